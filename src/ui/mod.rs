// Network Preferences - UI Module
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! The IP settings panel and the form boundary it drives.

pub mod form;
pub mod panel;

pub use form::{FieldId, MemoryForm};
pub use panel::{Action, IpSettingsPanel, Outcome};
