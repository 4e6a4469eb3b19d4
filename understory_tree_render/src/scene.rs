// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::types::RenderPass;

/// The drawing side of a node-link tree.
///
/// A scene turns each [`RenderPass`] into timed property animations on its own primitives. It must
/// not block: the driver hands over a pass and moves on. When a pass arrives while transitions of
/// an older generation are still running, the scene retargets or replaces them instead of queueing
/// behind them.
pub trait Scene {
    /// Start the transitions of `pass`.
    fn apply(&mut self, pass: &RenderPass);
}

/// Records passes, newest last.
impl Scene for Vec<RenderPass> {
    fn apply(&mut self, pass: &RenderPass) {
        self.push(pass.clone());
    }
}
