//! Retained widget tree.
//!
//! Widgets live in a fixed arena and are addressed by [`WidgetId`]. Deleting
//! a widget bumps the generation of its slot, so a handle kept past its
//! screen's lifetime fails with [`UiError::StaleHandle`] instead of reaching
//! whatever widget reuses the slot.

mod event;
mod input;

use embedded_graphics::geometry::Point;
use heapless::{Deque, String, Vec};
use log::debug;

pub use event::{
    Event, EventCallback, EventCode, EventContext, EventFilter, UserData, EVENT_QUEUE_LEN,
    MAX_CALLBACKS,
};

use crate::config::Theme;
use crate::images::ImageId;
use crate::styles::{Part, Style};
use crate::UiError;
use event::Registration;

pub const MAX_WIDGETS: usize = 128;
pub const MAX_CHILDREN: usize = 16;
const MAX_SHARED_STYLES: usize = 4;

pub type LabelText = String<64>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId {
    index: u16,
    generation: u16,
}

macro_rules! bit_set {
    ($name:ident { $($flag:ident = $bit:expr),* $(,)? }) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name(u8);

        impl $name {
            $(pub const $flag: Self = Self(1 << $bit);)*

            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }

            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            pub fn remove(&mut self, other: Self) {
                self.0 &= !other.0;
            }
        }
    };
}

bit_set!(Flags {
    HIDDEN = 0,
    CLICKABLE = 1,
    SCROLLABLE = 2,
    EVENT_BUBBLE = 3,
});

bit_set!(State {
    CHECKED = 0,
    PRESSED = 1,
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Length {
    Px(u32),
    /// Sized to fit the widget's content.
    Content,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArcData {
    pub min: i32,
    pub max: i32,
    pub value: i32,
    pub bg_start: u16,
    pub bg_end: u16,
    pub rotation: u16,
}

impl Default for ArcData {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            value: 0,
            bg_start: 135,
            bg_end: 45,
            rotation: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderData {
    pub min: i32,
    pub max: i32,
    pub value: i32,
}

impl Default for SliderData {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            value: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    Container,
    Label(LabelText),
    Arc(ArcData),
    Switch,
    Slider(SliderData),
    Image(Option<ImageId>),
    Button,
}

impl Kind {
    fn default_flags(&self) -> Flags {
        match self {
            Kind::Container => Flags::CLICKABLE.union(Flags::SCROLLABLE),
            Kind::Arc(_) | Kind::Switch | Kind::Slider(_) | Kind::Button => Flags::CLICKABLE,
            Kind::Label(_) | Kind::Image(_) => Flags::empty(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Widget {
    parent: Option<WidgetId>,
    children: Vec<WidgetId, MAX_CHILDREN>,
    pos: Point,
    width: Length,
    height: Length,
    flags: Flags,
    state: State,
    kind: Kind,
    local: [Style; Part::COUNT],
    shared: Vec<(Part, &'static Style), MAX_SHARED_STYLES>,
    applying_external: bool,
}

impl Widget {
    fn new(parent: Option<WidgetId>, kind: Kind) -> Self {
        Self {
            parent,
            children: Vec::new(),
            pos: Point::zero(),
            width: Length::Content,
            height: Length::Content,
            flags: kind.default_flags(),
            state: State::empty(),
            kind,
            local: [Style::new(); Part::COUNT],
            shared: Vec::new(),
            applying_external: false,
        }
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn width(&self) -> Length {
        self.width
    }

    pub fn height(&self) -> Length {
        self.height
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn has_flag(&self, flag: Flags) -> bool {
        self.flags.contains(flag)
    }

    pub fn has_state(&self, state: State) -> bool {
        self.state.contains(state)
    }

    pub fn is_applying_external(&self) -> bool {
        self.applying_external
    }
}

#[derive(Debug)]
struct Slot {
    generation: u16,
    widget: Option<Widget>,
}

pub struct Widgets {
    slots: Vec<Slot, MAX_WIDGETS>,
    callbacks: Vec<Registration, MAX_CALLBACKS>,
    events: Deque<Event, EVENT_QUEUE_LEN>,
    active: Option<WidgetId>,
    pressed: Option<WidgetId>,
    theme: Theme,
    dirty: bool,
}

impl Default for Widgets {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            callbacks: Vec::new(),
            events: Deque::new(),
            active: None,
            pressed: None,
            theme: Theme::default(),
            dirty: true,
        }
    }
}

impl Widgets {
    pub fn new() -> Self {
        Self::default()
    }

    //-----------
    // Lifecycle
    //-----------
    fn alloc(&mut self, parent: Option<WidgetId>, kind: Kind) -> Result<WidgetId, UiError> {
        if let Some(parent) = parent {
            if self.get(parent)?.children.is_full() {
                return Err(UiError::TooManyChildren);
            }
        }

        let widget = Widget::new(parent, kind);
        let id = match self.slots.iter().position(|slot| slot.widget.is_none()) {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.widget = Some(widget);
                WidgetId {
                    index: index as u16,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len();
                self.slots
                    .push(Slot {
                        generation: 0,
                        widget: Some(widget),
                    })
                    .map_err(|_| UiError::OutOfWidgets)?;
                WidgetId {
                    index: index as u16,
                    generation: 0,
                }
            }
        };

        if let Some(parent) = parent {
            self.get_mut(parent)?
                .children
                .push(id)
                .map_err(|_| UiError::TooManyChildren)?;
        }
        self.dirty = true;
        Ok(id)
    }

    /// Creates a plain object; without a parent it is a screen root.
    pub fn create_container(&mut self, parent: Option<WidgetId>) -> Result<WidgetId, UiError> {
        self.alloc(parent, Kind::Container)
    }

    pub fn create_label(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.alloc(Some(parent), Kind::Label(LabelText::new()))
    }

    pub fn create_arc(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.alloc(Some(parent), Kind::Arc(ArcData::default()))
    }

    pub fn create_switch(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.alloc(Some(parent), Kind::Switch)
    }

    pub fn create_slider(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.alloc(Some(parent), Kind::Slider(SliderData::default()))
    }

    pub fn create_image(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.alloc(Some(parent), Kind::Image(None))
    }

    pub fn create_button(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.alloc(Some(parent), Kind::Button)
    }

    /// Deletes a widget with all of its descendants and their callbacks.
    pub fn delete(&mut self, id: WidgetId) -> Result<(), UiError> {
        let widget = self.get(id)?;
        let parent = widget.parent;
        let children = widget.children.clone();

        for child in children {
            self.delete(child)?;
        }

        if let Some(parent) = parent {
            if let Ok(parent) = self.get_mut(parent) {
                parent.children.retain(|child| *child != id);
            }
        }

        self.callbacks.retain(|registration| registration.widget != id);
        if self.active == Some(id) {
            self.active = None;
        }
        if self.pressed == Some(id) {
            self.pressed = None;
        }

        let slot = &mut self.slots[id.index as usize];
        slot.widget = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.dirty = true;
        Ok(())
    }

    pub fn get(&self, id: WidgetId) -> Result<&Widget, UiError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.widget.as_ref())
            .ok_or(UiError::StaleHandle)
    }

    fn get_mut(&mut self, id: WidgetId) -> Result<&mut Widget, UiError> {
        let widget = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.widget.as_mut())
            .ok_or(UiError::StaleHandle)?;
        self.dirty = true;
        Ok(widget)
    }

    pub fn is_valid(&self, id: WidgetId) -> bool {
        self.get(id).is_ok()
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.widget.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes `root` the displayed screen.
    pub fn load(&mut self, root: WidgetId) -> Result<(), UiError> {
        if self.get(root)?.parent.is_some() {
            debug!("Loading a non-root widget as screen");
        }
        self.active = Some(root);
        self.pressed = None;
        self.dirty = true;
        Ok(())
    }

    pub fn active(&self) -> Option<WidgetId> {
        self.active
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.dirty = true;
    }

    /// True once after anything visible changed.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    //---------
    // Common
    //---------
    pub fn set_pos(&mut self, id: WidgetId, x: i32, y: i32) -> Result<(), UiError> {
        self.get_mut(id)?.pos = Point::new(x, y);
        Ok(())
    }

    pub fn set_size(&mut self, id: WidgetId, width: Length, height: Length) -> Result<(), UiError> {
        let widget = self.get_mut(id)?;
        widget.width = width;
        widget.height = height;
        Ok(())
    }

    pub fn add_flag(&mut self, id: WidgetId, flag: Flags) -> Result<(), UiError> {
        self.get_mut(id)?.flags.insert(flag);
        Ok(())
    }

    pub fn clear_flag(&mut self, id: WidgetId, flag: Flags) -> Result<(), UiError> {
        self.get_mut(id)?.flags.remove(flag);
        Ok(())
    }

    pub fn has_flag(&self, id: WidgetId, flag: Flags) -> Result<bool, UiError> {
        Ok(self.get(id)?.has_flag(flag))
    }

    /// Adding or clearing `CHECKED` reports a value change.
    pub fn add_state(&mut self, id: WidgetId, state: State) -> Result<(), UiError> {
        let widget = self.get_mut(id)?;
        let was_checked = widget.state.contains(State::CHECKED);
        widget.state.insert(state);
        if was_checked != widget.state.contains(State::CHECKED) {
            self.emit(EventCode::ValueChanged, id, None)?;
        }
        Ok(())
    }

    pub fn clear_state(&mut self, id: WidgetId, state: State) -> Result<(), UiError> {
        let widget = self.get_mut(id)?;
        let was_checked = widget.state.contains(State::CHECKED);
        widget.state.remove(state);
        if was_checked != widget.state.contains(State::CHECKED) {
            self.emit(EventCode::ValueChanged, id, None)?;
        }
        Ok(())
    }

    pub fn has_state(&self, id: WidgetId, state: State) -> Result<bool, UiError> {
        Ok(self.get(id)?.has_state(state))
    }

    //--------
    // Styles
    //--------
    pub fn add_style(
        &mut self,
        id: WidgetId,
        style: &'static Style,
        part: Part,
    ) -> Result<(), UiError> {
        let widget = self.get_mut(id)?;
        if widget.shared.is_full() {
            // Oldest style gives way, newest wins anyway.
            widget.shared.remove(0);
        }
        let _ = widget.shared.push((part, style));
        Ok(())
    }

    pub fn remove_style(
        &mut self,
        id: WidgetId,
        style: &'static Style,
        part: Part,
    ) -> Result<(), UiError> {
        self.get_mut(id)?
            .shared
            .retain(|(p, s)| !(*p == part && core::ptr::eq(*s, style)));
        Ok(())
    }

    /// Edits the widget's own style for one part.
    pub fn set_local_style(
        &mut self,
        id: WidgetId,
        part: Part,
        f: impl FnOnce(&mut Style),
    ) -> Result<(), UiError> {
        f(&mut self.get_mut(id)?.local[part as usize]);
        Ok(())
    }

    /// Resolves one property: the local style first, then shared styles with
    /// the most recently added winning.
    pub fn style_prop<T>(
        &self,
        id: WidgetId,
        part: Part,
        get: impl Fn(&Style) -> Option<T>,
    ) -> Option<T> {
        let widget = self.get(id).ok()?;
        get(&widget.local[part as usize]).or_else(|| {
            widget
                .shared
                .iter()
                .rev()
                .filter(|(p, _)| *p == part)
                .find_map(|(_, style)| get(style))
        })
    }

    //-------
    // Label
    //-------
    pub fn label_set_text(&mut self, id: WidgetId, text: &str) -> Result<(), UiError> {
        if let Kind::Label(label) = &mut self.get_mut(id)?.kind {
            *label = dash_core::util::truncated(text);
        }
        Ok(())
    }

    pub fn label_text(&self, id: WidgetId) -> Result<&str, UiError> {
        match &self.get(id)?.kind {
            Kind::Label(label) => Ok(label.as_str()),
            _ => Ok(""),
        }
    }

    //-----
    // Arc
    //-----
    fn arc_mut(&mut self, id: WidgetId) -> Result<Option<&mut ArcData>, UiError> {
        match &mut self.get_mut(id)?.kind {
            Kind::Arc(arc) => Ok(Some(arc)),
            _ => Ok(None),
        }
    }

    pub fn arc(&self, id: WidgetId) -> Result<Option<&ArcData>, UiError> {
        match &self.get(id)?.kind {
            Kind::Arc(arc) => Ok(Some(arc)),
            _ => Ok(None),
        }
    }

    pub fn arc_set_range(&mut self, id: WidgetId, min: i32, max: i32) -> Result<(), UiError> {
        if let Some(arc) = self.arc_mut(id)? {
            arc.min = min;
            arc.max = max.max(min);
            arc.value = arc.value.clamp(arc.min, arc.max);
        }
        Ok(())
    }

    pub fn arc_set_bg_angles(&mut self, id: WidgetId, start: u16, end: u16) -> Result<(), UiError> {
        if let Some(arc) = self.arc_mut(id)? {
            arc.bg_start = start % 360;
            arc.bg_end = if end == 360 { 360 } else { end % 360 };
        }
        Ok(())
    }

    pub fn arc_set_rotation(&mut self, id: WidgetId, rotation: u16) -> Result<(), UiError> {
        if let Some(arc) = self.arc_mut(id)? {
            arc.rotation = rotation % 360;
        }
        Ok(())
    }

    /// Clamps to the range; a new value reports a value change.
    pub fn arc_set_value(&mut self, id: WidgetId, value: i32) -> Result<(), UiError> {
        let changed = match self.arc_mut(id)? {
            Some(arc) => {
                let value = value.clamp(arc.min, arc.max);
                let changed = arc.value != value;
                arc.value = value;
                changed
            }
            None => false,
        };
        if changed {
            self.emit(EventCode::ValueChanged, id, None)?;
        }
        Ok(())
    }

    pub fn arc_value(&self, id: WidgetId) -> Result<i32, UiError> {
        Ok(self.arc(id)?.map(|arc| arc.value).unwrap_or(0))
    }

    //--------
    // Slider
    //--------
    fn slider_mut(&mut self, id: WidgetId) -> Result<Option<&mut SliderData>, UiError> {
        match &mut self.get_mut(id)?.kind {
            Kind::Slider(slider) => Ok(Some(slider)),
            _ => Ok(None),
        }
    }

    pub fn slider(&self, id: WidgetId) -> Result<Option<&SliderData>, UiError> {
        match &self.get(id)?.kind {
            Kind::Slider(slider) => Ok(Some(slider)),
            _ => Ok(None),
        }
    }

    pub fn slider_set_range(&mut self, id: WidgetId, min: i32, max: i32) -> Result<(), UiError> {
        if let Some(slider) = self.slider_mut(id)? {
            slider.min = min;
            slider.max = max.max(min);
            slider.value = slider.value.clamp(slider.min, slider.max);
        }
        Ok(())
    }

    pub fn slider_set_value(&mut self, id: WidgetId, value: i32) -> Result<(), UiError> {
        let changed = match self.slider_mut(id)? {
            Some(slider) => {
                let value = value.clamp(slider.min, slider.max);
                let changed = slider.value != value;
                slider.value = value;
                changed
            }
            None => false,
        };
        if changed {
            self.emit(EventCode::ValueChanged, id, None)?;
        }
        Ok(())
    }

    pub fn slider_value(&self, id: WidgetId) -> Result<i32, UiError> {
        Ok(self.slider(id)?.map(|slider| slider.value).unwrap_or(0))
    }

    //-------
    // Image
    //-------
    pub fn image_set_src(&mut self, id: WidgetId, src: ImageId) -> Result<(), UiError> {
        if let Kind::Image(image) = &mut self.get_mut(id)?.kind {
            *image = Some(src);
        }
        Ok(())
    }

    pub fn image_src(&self, id: WidgetId) -> Result<Option<ImageId>, UiError> {
        match self.get(id)?.kind {
            Kind::Image(src) => Ok(src),
            _ => Ok(None),
        }
    }

    //-----------------
    // External update
    //-----------------
    /// Runs `f` with `id` marked as applying an external update. Events the
    /// widget emits meanwhile carry `external_update`, so handlers can tell
    /// them apart from user input.
    pub fn apply_external<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut Self) -> Result<R, UiError>,
    ) -> Result<R, UiError> {
        self.get_mut(id)?.applying_external = true;
        let result = f(self);
        if let Ok(widget) = self.get_mut(id) {
            widget.applying_external = false;
        }
        result
    }
}
