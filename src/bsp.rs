// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Board Support Packages: one identity record per supported board.
//!
//! The interface chip and its wiring are the same on every board; what
//! changes is the target sitting next to it, and so the descriptor handed to
//! target control and the drive-reporting code.
//!
//! To add a board:
//!
//! 1. Create a module within `hiclink::bsp` named after your board.
//! 2. Define a type in the module called `Board`. It is never instantiated,
//!    so an empty struct is fine.
//! 3. Implement `hiclink::bsp::Bsp` for your `Board` type, and
//!    `const_assert!` that its `INFO` is valid.
//! 4. Add a `target-board-*` feature to `Cargo.toml`.
//! 5. Add a branch to the `cfg_if` below.

// Note that these modules are not conditionally included. We always compile
// every BSP so that every descriptor gets checked, whichever board is
// selected.
pub mod mimxrt1020_evk;
pub mod mimxrt1050_evk;

use crate::board::BoardInfo;

/// Requirements placed upon a BSP type.
pub trait Bsp {
    /// Identity record for the board. Validated at compile time by the board
    /// module.
    const INFO: BoardInfo;
}

cfg_if::cfg_if! {
    if #[cfg(feature = "target-board-mimxrt1020-evk")] {
        pub use mimxrt1020_evk::Board;
    } else if #[cfg(feature = "target-board-mimxrt1050-evk")] {
        pub use mimxrt1050_evk::Board;
    } else {
        compile_error!("missing target-board-* feature");
    }
}

/// The one descriptor for this firmware image.
pub static BOARD_INFO: BoardInfo = <Board as Bsp>::INFO;
