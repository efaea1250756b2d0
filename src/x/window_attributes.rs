use xcb::x::{Colormap, Cw, EventMask};

/// Builder for changing window attributes.
pub struct WindowAttributes {
    value_list: Vec<Cw>,
}

impl WindowAttributes {
    pub const fn new() -> Self {
        Self {
            value_list: Vec::new(),
        }
    }

    /// The server expects the values ordered by their mask bit.
    pub fn value_list(&mut self) -> &[Cw] {
        self.value_list.sort();
        &self.value_list
    }

    pub fn event_mask(&mut self, mask: EventMask) -> &mut Self {
        self.value_list.push(Cw::EventMask(mask));
        self
    }

    pub fn background_pixel(&mut self, pixel: u32) -> &mut Self {
        self.value_list.push(Cw::BackPixel(pixel));
        self
    }

    pub fn border_pixel(&mut self, pixel: u32) -> &mut Self {
        self.value_list.push(Cw::BorderPixel(pixel));
        self
    }

    pub fn override_redirect(&mut self) -> &mut Self {
        self.value_list.push(Cw::OverrideRedirect(true));
        self
    }

    pub fn colormap(&mut self, cmap: Colormap) -> &mut Self {
        self.value_list.push(Cw::Colormap(cmap));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_list_is_sorted_by_mask_bit() {
        let mut attributes = WindowAttributes::new();
        attributes
            .event_mask(EventMask::EXPOSURE)
            .override_redirect()
            .border_pixel(0)
            .background_pixel(0);
        let list = attributes.value_list();
        assert!(matches!(list[0], Cw::BackPixel(0)));
        assert!(matches!(list[1], Cw::BorderPixel(0)));
        assert!(matches!(list[2], Cw::OverrideRedirect(true)));
        assert!(matches!(list[3], Cw::EventMask(_)));
    }
}
