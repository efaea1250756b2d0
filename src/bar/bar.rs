use super::Position;
use crate::{
    class_hint::ClassHint,
    color::Color,
    config::{BarConfig, RootWindow},
    error::fatal_error,
    ewmh::{self, Strut, WindowState, WindowType},
    plugin::PluginThread,
    rectangle::Rectangle,
    x::{randr, Display, PropertyValue, SetProperty, Visual, Window, XcbWindow},
    AnyResult,
};
use cairo::{Context, Operator, XCBConnection, XCBDrawable, XCBSurface, XCBVisualType};
use pango::Layout;
use std::{ops::Range, ptr::NonNull, sync::Arc};
use xcb::{x::EventMask, Xid};

const WM_CLASS: &str = "excalibar";

/// Horizontal extent of one plugin's text on the bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub range: Range<i32>,
    /// Index into the plugin list passed to `Bar::draw`.
    pub plugin: usize,
}

/// Returns the index of the plugin whose segment contains `x`.
pub fn segment_at(segments: &[Segment], x: i32) -> Option<usize> {
    segments
        .iter()
        .find(|segment| segment.range.contains(&x))
        .map(|segment| segment.plugin)
}

/// Computes the geometry of the bar on the given monitor.
pub fn bar_geometry(config: &BarConfig, monitor: &Rectangle) -> Rectangle {
    let width = if config.width == 0 {
        monitor.width
    } else {
        config.width
    };
    let x = clamp_coordinate(monitor.x as i32 + config.x);
    let y = match config.position {
        Position::Top => monitor.y,
        Position::Bottom => clamp_coordinate(monitor.bottom_edge() as i32 - config.height as i32),
    };
    Rectangle::new(x, y, width, config.height)
}

fn clamp_coordinate(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// The window the bar is stacked above, kept between lookups until stacking
/// above it fails or it is destroyed.
#[derive(Debug, Default)]
struct Sibling(Option<XcbWindow>);

impl Sibling {
    fn get_or_find(&mut self, find: impl FnOnce() -> Option<XcbWindow>) -> Option<XcbWindow> {
        if self.0.is_none() {
            self.0 = find();
        }
        self.0
    }

    fn forget(&mut self, window: XcbWindow) {
        if self.0 == Some(window) {
            self.0 = None;
        }
    }
}

pub struct Bar {
    display: Arc<Display>,
    window: Window,
    visual: Visual,
    geometry: Rectangle,
    config: BarConfig,
    surface: XCBSurface,
    context: Context,
    layout: Layout,
    segments: Vec<Segment>,
    sibling: Sibling,
    destroyed: bool,
}

impl Bar {
    /// Creates, configures and maps the bar window.
    pub fn create(display: Arc<Display>, config: &BarConfig) -> AnyResult<Self> {
        let visual = if config.transparent {
            Visual::find_argb32(&display)?.unwrap_or_else(|| {
                fatal_error("No 32-bit TrueColor visual available for transparency".to_string())
            })
        } else {
            Visual::root(&display)
        };
        let monitor = randr::main_monitor_geometry(&display);
        let geometry = bar_geometry(config, &monitor);
        log::info!("Creating bar at {geometry} on monitor {monitor}");

        let window = Window::builder(display.clone())
            .geometry(geometry)
            .visual_info(&visual)
            .attributes(|attributes| {
                attributes
                    .background_pixel(0)
                    .border_pixel(0)
                    .override_redirect()
                    .event_mask(
                        EventMask::BUTTON_PRESS
                            | EventMask::BUTTON_RELEASE
                            | EventMask::POINTER_MOTION
                            | EventMask::EXPOSURE
                            | EventMask::STRUCTURE_NOTIFY
                            | EventMask::SUBSTRUCTURE_NOTIFY,
                    );
            })
            .build();
        log::debug!("Bar window: {window}");

        update_root_events(&display)?;
        set_attributes(&window);
        let screen_height = display.screen_size().1;
        ewmh::set_strut(
            &window,
            &Strut::for_bar(config.position, &geometry, screen_height),
        );

        ClassHint::new(WM_CLASS, WM_CLASS).set(&window);
        window.set_property(
            &display,
            display.atoms.net_wm_name,
            PropertyValue::String(WM_CLASS.to_string()),
        );

        let surface = unsafe {
            // The raw xcb pointers are cast to the cairo-sys types directly.
            use cairo_sys::{xcb_connection_t, xcb_visualtype_t};
            let connection = display.connection().get_raw_conn() as *mut xcb_connection_t;
            let visual_type = visual
                .find_type(&display)
                .ok_or("Visual type of the bar visual not found")?
                as *mut xcb_visualtype_t;
            XCBSurface::create(
                &XCBConnection(NonNull::new(connection).ok_or("Null xcb connection")?),
                &XCBDrawable(window.handle().resource_id()),
                &XCBVisualType(NonNull::new(visual_type).ok_or("Null visual type")?),
                geometry.width as i32,
                geometry.height as i32,
            )?
        };
        let context = Context::new(&surface)?;
        let layout = pangocairo::create_layout(&context);
        layout.set_font_description(Some(&config.font));
        surface.flush();

        let mut this = Self {
            display,
            window,
            visual,
            geometry,
            config: config.clone(),
            surface,
            context,
            layout,
            segments: Vec::new(),
            sibling: Sibling::default(),
            destroyed: false,
        };
        this.restack();
        this.window.map();
        this.display.flush();
        Ok(this)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Keeps the bar above the other windows. With an i3 root window the bar
    /// is stacked directly above it, otherwise it is raised to the top.
    pub fn restack(&mut self) {
        let sibling = match self.config.root_win {
            RootWindow::I3 => {
                let display = &self.display;
                self.sibling.get_or_find(|| ewmh::find_i3_root(display))
            }
            RootWindow::Root => None,
        };
        match sibling {
            Some(sibling) => {
                if let Err(error) = self.window.stack_above(sibling) {
                    log::warn!("Failed to stack bar above {sibling:?}: {error}");
                    self.sibling.forget(sibling);
                    self.window.raise();
                }
            }
            None => self.window.raise(),
        }
        self.display.flush();
    }

    /// Called when a child of the root window was destroyed.
    pub fn window_destroyed(&mut self, window: XcbWindow) {
        self.sibling.forget(window);
    }

    fn set_color(&self, color: &Color) {
        let (r, g, b, a) = color.components();
        if self.visual.has_alpha() {
            self.context.set_source_rgba(r, g, b, a);
        } else {
            self.context.set_source_rgb(r, g, b);
        }
    }

    /// Redraws the bar with the current texts of the given plugins, laid out
    /// from left to right.
    pub fn draw(&mut self, plugins: &[PluginThread]) {
        let padding = self.config.padding as i32;
        let gap = self.config.gap as i32;
        let height = self.geometry.height as i32;
        self.context.set_operator(Operator::Source);
        self.set_color(&self.config.background);
        self.context.paint().ok();
        self.context.set_operator(Operator::Over);
        self.set_color(&self.config.foreground);

        self.segments.clear();
        let mut x = padding;
        for (index, plugin) in plugins.iter().enumerate() {
            let text = plugin.text();
            if text.is_empty() {
                continue;
            }
            self.layout.set_text(&text);
            let (width, text_height) = self.layout.pixel_size();
            let y = (height - text_height) / 2;
            self.context.move_to(x as f64, y as f64);
            pangocairo::show_layout(&self.context, &self.layout);
            self.segments.push(Segment {
                range: (x - gap / 2)..(x + width + gap - gap / 2),
                plugin: index,
            });
            x += width + gap;
        }
        self.surface.flush();
        self.display.flush();
    }

    /// Index of the plugin drawn at the given x coordinate.
    pub fn segment_at(&self, x: i32) -> Option<usize> {
        segment_at(&self.segments, x)
    }

    /// Called when the server destroyed the window for us.
    pub fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

    pub fn handle(&self) -> XcbWindow {
        self.window.handle()
    }

    pub fn destroy(&mut self) {
        self.surface.finish();
        if !self.destroyed {
            log::trace!("Destroying bar window {}", self.window);
            self.window.destroy();
            self.destroyed = true;
        }
        self.display.flush();
    }
}

impl Drop for Bar {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Selects the root window events the bar reacts to.
fn update_root_events(display: &Arc<Display>) -> AnyResult<()> {
    Window::from_handle(display.clone(), display.root()).try_change_attributes(|attributes| {
        attributes.event_mask(EventMask::SUBSTRUCTURE_NOTIFY | EventMask::PROPERTY_CHANGE);
    })?;
    Ok(())
}

fn set_attributes(window: &Window) {
    ewmh::set_window_type(window, WindowType::Dock);
    ewmh::set_wm_state(window, &[WindowState::Sticky, WindowState::Above]);
    ewmh::set_wm_desktop(window, ewmh::ALL_DESKTOPS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcb::XidNew;

    fn segments() -> Vec<Segment> {
        vec![
            Segment {
                range: 0..50,
                plugin: 0,
            },
            Segment {
                range: 50..80,
                plugin: 2,
            },
        ]
    }

    #[test]
    fn hit_test() {
        let segments = segments();
        assert_eq!(segment_at(&segments, 0), Some(0));
        assert_eq!(segment_at(&segments, 49), Some(0));
        assert_eq!(segment_at(&segments, 50), Some(2));
        assert_eq!(segment_at(&segments, 80), None);
        assert_eq!(segment_at(&segments, -1), None);
        assert_eq!(segment_at(&[], 10), None);
    }

    #[test]
    fn sibling_is_looked_up_once() {
        let window = unsafe { XcbWindow::new(0x600001) };
        let other = unsafe { XcbWindow::new(0x600002) };
        let mut sibling = Sibling::default();
        let mut lookups = 0;
        for _ in 0..3 {
            let found = sibling.get_or_find(|| {
                lookups += 1;
                Some(window)
            });
            assert_eq!(found, Some(window));
        }
        assert_eq!(lookups, 1);

        sibling.forget(other);
        assert_eq!(sibling.get_or_find(|| None), Some(window));
        sibling.forget(window);
        assert_eq!(sibling.get_or_find(|| None), None);
        assert_eq!(sibling.get_or_find(|| Some(other)), Some(other));
    }

    #[test]
    fn geometry_of_oversized_bottom_bar_is_clamped() {
        let config = BarConfig {
            height: 40000,
            position: Position::Bottom,
            ..BarConfig::default()
        };
        let monitor = Rectangle::new(0, 0, 1920, 1080);
        let geometry = bar_geometry(&config, &monitor);
        assert_eq!(geometry.y, i16::MIN);
        assert_eq!(geometry.height, 40000);
        let config = BarConfig {
            height: 30000,
            ..config
        };
        assert_eq!(bar_geometry(&config, &monitor).y, -28920);
    }

    #[test]
    fn geometry_uses_monitor_width_by_default() {
        let config = BarConfig::default();
        let monitor = Rectangle::new(1920, 0, 2560, 1440);
        assert_eq!(
            bar_geometry(&config, &monitor),
            Rectangle::new(1920, 0, 2560, 24)
        );
    }

    #[test]
    fn geometry_of_bottom_bar() {
        let config = BarConfig {
            width: 800,
            height: 30,
            x: 100,
            position: Position::Bottom,
            ..BarConfig::default()
        };
        let monitor = Rectangle::new(0, 0, 1920, 1080);
        assert_eq!(
            bar_geometry(&config, &monitor),
            Rectangle::new(100, 1050, 800, 30)
        );
    }
}
