//! Version and naming facts about this library and the format it writes,
//! loaded from an embedded properties resource.

use crate::codec::string_map;
use crate::error::{Result, StandardBomError};
use std::sync::OnceLock;

const RESOURCE_NAME: &str = "standard-bom-version.properties";
const RESOURCE_TEXT: &str = include_str!("../resources/standard-bom-version.properties");

/// Facts about the Standard BOM format and this library implementation.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub spec_tool_name: String,
    pub spec_version: String,
    pub spec_website: String,
    pub library_group: String,
    pub library_name: String,
    pub library_version: String,
    pub library_description: String,
    pub library_website: String,
}

impl VersionInfo {
    /// The version facts embedded in this build.
    ///
    /// The resource is part of the compiled binary and validated by unit
    /// tests, so a load failure can only mean a broken build.
    pub fn get() -> &'static VersionInfo {
        static INFO: OnceLock<VersionInfo> = OnceLock::new();
        INFO.get_or_init(|| load().expect("embedded version resource must be loadable"))
    }
}

fn load() -> Result<VersionInfo> {
    let map = string_map::decode(RESOURCE_TEXT).map_err(|e| StandardBomError::Resource {
        resource: RESOURCE_NAME.to_string(),
        message: e.to_string(),
    })?;
    let field = |key: &str| -> Result<String> {
        map.get(key).cloned().ok_or_else(|| StandardBomError::Resource {
            resource: RESOURCE_NAME.to_string(),
            message: format!("missing key: {key}"),
        })
    };
    Ok(VersionInfo {
        spec_tool_name: field("spec.toolName")?,
        spec_version: field("spec.version")?,
        spec_website: field("spec.website")?,
        library_group: field("library.group")?,
        library_name: field("library.name")?,
        library_version: field("library.version")?,
        library_description: field("library.description")?,
        library_website: field("library.website")?,
    })
}
