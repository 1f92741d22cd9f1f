// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BSP for the NXP MIMXRT1050-EVK (HyperFlash configuration).

use static_assertions::const_assert;

use super::Bsp;
use crate::board::{BoardFlags, BoardInfo, FamilyId, TargetConfig, INFO_VERSION};

const TARGET_DEVICE: TargetConfig = TargetConfig {
    version: 1,
    target_vendor: "NXP",
    target_part_number: "MIMXRT1052DVL6B",
};

pub struct Board;

impl Bsp for Board {
    const INFO: BoardInfo = BoardInfo {
        info_version: INFO_VERSION,
        board_id: "0227",
        family_id: FamilyId::NxpMimxrt,
        flags: BoardFlags::ENABLE_PAGE_ERASE,
        daplink_url_name: "PRODINFOHTM",
        daplink_drive_name: "RT1050-EVK",
        daplink_target_url: "http://www.nxp.com/imxrt1050evk",
        target_cfg: &TARGET_DEVICE,
    };
}

const_assert!(<Board as Bsp>::INFO.is_valid());
