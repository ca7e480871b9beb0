//! Main entry point for TesseraCli

#![deny(warnings, missing_docs, trivial_casts, unused_qualifications)]
#![forbid(unsafe_code)]

use tessera_cli::application::APP;

/// Boot TesseraCli
fn main() {
    abscissa_core::boot(&APP);
}
