//
//  obs-api
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Pretty-printed JSON for `--json`, suitable for piping to `jq`.
//!
//! References print as bare strings, or `null` when unset:
//!
//! ```json
//! {
//!   "name": "developers",
//!   "maintainer": null,
//!   "members": [
//!     "alice",
//!     "bob"
//!   ]
//! }
//! ```

use serde::Serialize;
use std::io::Write;

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json_to<W: Write + ?Sized, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
