use super::Display;
use xcb::{
    x::{Colormap, VisualClass, Visualid, Visualtype},
    ProtocolResult,
};

#[derive(Copy, Clone, Debug)]
pub struct Visual {
    pub depth: u8,
    pub id: Visualid,
    pub colormap: Colormap,
}

/// Does a visual with these properties support an alpha channel?
pub fn is_argb32(depth: u8, class: VisualClass, bits_per_rgb_value: u8) -> bool {
    depth == 32 && class == VisualClass::TrueColor && bits_per_rgb_value == 8
}

impl Visual {
    /// Finds the first 32-bit TrueColor visual of the screen and creates a new
    /// colormap for it. Returns `Ok(None)` if the screen has no such visual.
    pub fn find_argb32(display: &Display) -> ProtocolResult<Option<Self>> {
        let found = display
            .screen()
            .allowed_depths()
            .filter(|depth| depth.depth() == 32)
            .flat_map(|depth| depth.visuals().iter().map(move |v| (depth.depth(), v)))
            .find(|(depth, v)| is_argb32(*depth, v.class(), v.bits_per_rgb_value()))
            .map(|(depth, v)| (depth, v.visual_id()));
        match found {
            Some((depth, id)) => {
                let colormap = display.create_colormap(id)?;
                log::debug!("Using ARGB visual {id:#x} (depth={depth})");
                Ok(Some(Self {
                    depth,
                    id,
                    colormap,
                }))
            }
            None => Ok(None),
        }
    }

    /// The visual of the root window, using the default colormap.
    pub fn root(display: &Display) -> Self {
        let screen = display.screen();
        Self {
            depth: screen.root_depth(),
            id: screen.root_visual(),
            colormap: screen.default_colormap(),
        }
    }

    /// Looks up the visual type for this visual.
    /// The returned pointer points into the connection setup data and remains
    /// valid for the lifetime of the connection.
    pub fn find_type(&self, display: &Display) -> Option<*mut Visualtype> {
        for depth in display
            .screen()
            .allowed_depths()
            .filter(|d| d.depth() == self.depth)
        {
            for visual_type in depth.visuals() {
                if visual_type.visual_id() == self.id {
                    // cairo wants a `NonNull` which requires a mutable pointer
                    return Some(visual_type as *const Visualtype as *mut Visualtype);
                }
            }
        }
        None
    }

    pub fn has_alpha(&self) -> bool {
        self.depth == 32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb32_requires_depth_class_and_bits() {
        assert!(is_argb32(32, VisualClass::TrueColor, 8));
        assert!(!is_argb32(24, VisualClass::TrueColor, 8));
        assert!(!is_argb32(32, VisualClass::DirectColor, 8));
        assert!(!is_argb32(32, VisualClass::TrueColor, 10));
    }
}
