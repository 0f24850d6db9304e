//! Contract with the flow engine that owns the values screens are bound to.
//!
//! Screens never read variables directly. Every bound property is addressed
//! as `(flow state, component, property)` and evaluated or assigned through
//! [`FlowEngine`]. Failures are reported by the engine with the message the
//! caller passes in.

use crate::widgets::LabelText;

/// Property index of a component's `Hidden` flag.
pub const PROP_HIDDEN: u16 = 0;
/// Property index of an image component's source.
pub const PROP_SRC: u16 = 1;
/// Property index of a component's value (checked state, arc value, text).
pub const PROP_VALUE: u16 = 3;

/// Per-screen data context, opaque to screen code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlowState {
    page: u16,
    flow_index: u16,
}

impl FlowState {
    pub const fn new(page: u16, flow_index: u16) -> Self {
        Self { page, flow_index }
    }

    pub fn page(&self) -> u16 {
        self.page
    }

    pub fn flow_index(&self) -> u16 {
        self.flow_index
    }
}

/// Names of everything the generated UI declares, handed to the engine once
/// at start-up for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameTables {
    pub screens: &'static [&'static str],
    pub objects: &'static [&'static str],
    pub styles: &'static [&'static str],
    pub themes: &'static [&'static str],
}

pub trait FlowEngine {
    fn init_names(&mut self, _names: &NameTables) {}

    fn get_flow_state(&mut self, page: u16, flow_index: u16) -> FlowState;

    fn eval_boolean_property(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        error: &'static str,
    ) -> bool;

    fn eval_integer_property(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        error: &'static str,
    ) -> i32;

    fn eval_text_property(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        error: &'static str,
    ) -> LabelText;

    fn assign_boolean_property(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        value: bool,
        error: &'static str,
    );

    fn assign_integer_property(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        value: i32,
        error: &'static str,
    );

    fn delete_page_flow_state(&mut self, page: u16);
}

#[cfg(test)]
pub(crate) mod tests {
    use heapless::Vec;

    use super::*;

    type Key = (u16, u16);

    /// Engine answering from fixed tables and recording every write.
    #[derive(Default)]
    pub struct RecordingFlow {
        pub bools: Vec<(Key, bool), 16>,
        pub ints: Vec<(Key, i32), 16>,
        pub texts: Vec<(Key, &'static str), 16>,
        pub assigned_bools: Vec<(u16, u16, bool), 16>,
        pub assigned_ints: Vec<(u16, u16, i32), 16>,
        pub live_pages: Vec<u16, 4>,
        pub deleted_pages: Vec<u16, 4>,
        pub evaluations: usize,
    }

    fn lookup<T: Copy + Default>(table: &[(Key, T)], key: Key) -> T {
        table
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or_default()
    }

    impl FlowEngine for RecordingFlow {
        fn get_flow_state(&mut self, page: u16, flow_index: u16) -> FlowState {
            if !self.live_pages.contains(&page) {
                let _ = self.live_pages.push(page);
            }
            FlowState::new(page, flow_index)
        }

        fn eval_boolean_property(&mut self, _: FlowState, c: u16, p: u16, _: &'static str) -> bool {
            self.evaluations += 1;
            lookup(&self.bools, (c, p))
        }

        fn eval_integer_property(&mut self, _: FlowState, c: u16, p: u16, _: &'static str) -> i32 {
            self.evaluations += 1;
            lookup(&self.ints, (c, p))
        }

        fn eval_text_property(&mut self, _: FlowState, c: u16, p: u16, _: &'static str) -> LabelText {
            self.evaluations += 1;
            dash_core::util::truncated(lookup(&self.texts, (c, p)))
        }

        fn assign_boolean_property(&mut self, _: FlowState, c: u16, p: u16, value: bool, _: &'static str) {
            let _ = self.assigned_bools.push((c, p, value));
        }

        fn assign_integer_property(&mut self, _: FlowState, c: u16, p: u16, value: i32, _: &'static str) {
            let _ = self.assigned_ints.push((c, p, value));
        }

        fn delete_page_flow_state(&mut self, page: u16) {
            self.live_pages.retain(|p| *p != page);
            let _ = self.deleted_pages.push(page);
        }
    }
}
