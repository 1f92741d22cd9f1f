// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface to the subsystem that owns the target's reset line.

/// Reset states the GPIO driver asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetState {
    /// Assert target reset and keep it asserted.
    ResetHold,
    /// Release target reset and let it run.
    ResetRun,
}

pub trait TargetControl {
    fn set_state(&mut self, state: TargetState);
}
