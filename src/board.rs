// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Board identity records.
//!
//! Every board this firmware can be built for is described by exactly one
//! `BoardInfo`, created at compile time and never touched afterwards. The
//! record is read by target control (to pick target-specific algorithms) and
//! by the drive-reporting code (for the user-facing info files), neither of
//! which lives in this crate.

use bitflags::bitflags;

/// Current layout version of `BoardInfo`.
pub const INFO_VERSION: u16 = 0;

/// Board IDs are four hex digits.
pub const BOARD_ID_LEN: usize = 4;
/// The info page is reported as an 8.3 name without the dot.
pub const URL_NAME_LEN: usize = 11;
/// FAT volume labels hold at most 11 characters.
pub const DRIVE_NAME_MAX: usize = 11;
pub const TARGET_URL_MAX: usize = 63;

pub const VENDOR_NXP: u8 = 11;

const fn family(vendor: u8, index: u8) -> u16 {
    (vendor as u16) << 8 | index as u16
}

/// Target family, encoded as `vendor << 8 | family`.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FamilyId {
    NxpMimxrt = family(VENDOR_NXP, 2),
}

impl FamilyId {
    pub const fn vendor(self) -> u8 {
        (self as u16 >> 8) as u8
    }
}

bitflags! {
    /// Capabilities of the board, consumed by target control.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct BoardFlags: u8 {
        /// Flash algorithm may erase single pages rather than whole sectors.
        const ENABLE_PAGE_ERASE = 1 << 0;
    }
}

/// Target-side configuration referenced by a board. Only the identifying
/// fields are modeled here; flash algorithms and memory maps belong to the
/// target support code.
#[derive(Debug)]
pub struct TargetConfig {
    pub version: u8,
    pub target_vendor: &'static str,
    pub target_part_number: &'static str,
}

/// Identity record for one supported board.
#[derive(Debug)]
pub struct BoardInfo {
    pub info_version: u16,
    pub board_id: &'static str,
    pub family_id: FamilyId,
    pub flags: BoardFlags,
    pub daplink_url_name: &'static str,
    pub daplink_drive_name: &'static str,
    pub daplink_target_url: &'static str,
    pub target_cfg: &'static TargetConfig,
}

impl BoardInfo {
    /// Checks the field constraints that the reporting code relies on. This is
    /// a `const fn` so board modules can reject bad records at compile time.
    pub const fn is_valid(&self) -> bool {
        self.info_version == INFO_VERSION
            && self.board_id.len() == BOARD_ID_LEN
            && all_upper_hex(self.board_id)
            && self.daplink_url_name.len() == URL_NAME_LEN
            && all_printable(self.daplink_url_name)
            && !self.daplink_drive_name.is_empty()
            && self.daplink_drive_name.len() <= DRIVE_NAME_MAX
            && all_printable(self.daplink_drive_name)
            && !self.daplink_target_url.is_empty()
            && self.daplink_target_url.len() <= TARGET_URL_MAX
            && all_printable(self.daplink_target_url)
    }
}

const fn all_upper_hex(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' | b'A'..=b'F' => {}
            _ => return false,
        }
        i += 1;
    }
    true
}

const fn all_printable(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] < 0x20 || bytes[i] > 0x7e {
            return false;
        }
        i += 1;
    }
    true
}
