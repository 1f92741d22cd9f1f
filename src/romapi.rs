// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The LPC11U35 boot ROM's In-Application Programming interface.
//!
//! The ROM exposes a single entry point taking a command table and a result
//! table, both arrays of words. ISP is re-entered through the same interface
//! (command 57), in which case the call does not return.

/// IAP entry point. The low bit selects Thumb state.
pub const IAP_ENTRY: u32 = 0x1fff_1ff1;

/// Words in the IAP command table.
pub const COMMAND_WORDS: usize = 5;
/// Words in the IAP result table.
pub const RESULT_WORDS: usize = 4;

/// IAP command codes used by this firmware, from the LPC11Uxx user manual's
/// IAP chapter.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IapCommand {
    ReinvokeIsp = 57,
}

/// Builds the command table for `command` with no parameters.
pub const fn command_table(command: IapCommand) -> [u32; COMMAND_WORDS] {
    let mut table = [0; COMMAND_WORDS];
    table[0] = command as u32;
    table
}
