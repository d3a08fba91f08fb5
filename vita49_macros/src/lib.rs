// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use proc_macro::TokenStream;

mod cif_field;

/// Generates a getter, setter, and unsetter function for the
/// given presence-bit field.
///
/// In format:
///  - `${cif_field}()`: Returns bit state (1 = true, 0 = false)
///  - `set_${cif_field}()`: Sets the bit
///  - `unset_${cif_field}()`: Unsets the bit
#[proc_macro]
pub fn cif_field(input: TokenStream) -> TokenStream {
    cif_field::cif_field(input.into()).into()
}
