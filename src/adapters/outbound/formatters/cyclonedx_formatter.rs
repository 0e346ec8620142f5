use crate::dependency_analysis::domain::{License, ResolvedCoordinate};
use crate::dependency_analysis::policies::LicenseClassification;
use crate::ports::outbound::{SbomFormatter, SbomSubject};
use crate::shared::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Bom {
    #[serde(rename = "bomFormat")]
    bom_format: String,
    #[serde(rename = "specVersion")]
    spec_version: String,
    version: u32,
    #[serde(rename = "serialNumber")]
    serial_number: String,
    metadata: Metadata,
    #[serde(default)]
    components: Vec<Component>,
    #[serde(default)]
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Metadata {
    timestamp: String,
    #[serde(default)]
    tools: Vec<Tool>,
    component: Option<Component>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Tool {
    name: String,
    version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Component {
    #[serde(rename = "type")]
    component_type: String,
    #[serde(rename = "bom-ref")]
    bom_ref: String,
    group: String,
    name: String,
    version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    licenses: Vec<LicenseChoice>,
    purl: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LicenseChoice {
    license: LicenseContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LicenseContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Dependency {
    #[serde(rename = "ref")]
    bom_ref: String,
    #[serde(rename = "dependsOn", default, skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
}

/// CycloneDxFormatter adapter for generating CycloneDX 1.6 JSON format
///
/// Components are referenced by their package URL, so `bom-ref` and `purl`
/// are always the same string.
pub struct CycloneDxFormatter;

impl CycloneDxFormatter {
    pub fn new() -> Self {
        Self
    }

    fn component(coordinate: &ResolvedCoordinate, component_type: &str) -> Component {
        let purl = coordinate.purl();
        Component {
            component_type: component_type.to_string(),
            bom_ref: purl.clone(),
            group: coordinate.group.clone(),
            name: coordinate.artifact.clone(),
            version: coordinate.version.clone(),
            licenses: Vec::new(),
            purl,
        }
    }

    /// A recognized family is written as its SPDX id, anything else by name.
    fn build_license(license: &License) -> LicenseChoice {
        let id = LicenseClassification::classify(license).spdx_id();
        LicenseChoice {
            license: LicenseContent {
                id: id.map(str::to_string),
                name: id.is_none().then(|| license.name.clone()),
                url: license.url.clone(),
            },
        }
    }

    fn build_components(subject: &SbomSubject) -> Vec<Component> {
        subject
            .components
            .iter()
            .map(|c| Component {
                licenses: subject
                    .licenses
                    .get(c)
                    .map(|licenses| licenses.iter().map(Self::build_license).collect())
                    .unwrap_or_default(),
                ..Self::component(c, "library")
            })
            .collect()
    }

    fn build_dependencies(subject: &SbomSubject) -> Vec<Dependency> {
        subject
            .edges
            .iter()
            .map(|(from, to)| Dependency {
                bom_ref: from.purl(),
                depends_on: to.iter().map(ResolvedCoordinate::purl).collect(),
            })
            .collect()
    }
}

impl Default for CycloneDxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CycloneDxFormatter {
    fn format(&self, subject: &SbomSubject) -> Result<String> {
        let bom = Bom {
            bom_format: "CycloneDX".to_string(),
            spec_version: "1.6".to_string(),
            version: 1,
            serial_number: format!("urn:uuid:{}", uuid::Uuid::new_v4()),
            metadata: Metadata {
                timestamp: chrono::Utc::now().to_rfc3339(),
                tools: vec![Tool {
                    name: env!("CARGO_PKG_NAME").to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                }],
                component: Some(Self::component(&subject.project, "application")),
            },
            components: Self::build_components(subject),
            dependencies: Self::build_dependencies(subject),
        };

        serde_json::to_string_pretty(&bom).map_err(Into::into)
    }

    fn is_equivalent(&self, existing: &str, subject: &SbomSubject) -> bool {
        let Ok(bom) = serde_json::from_str::<Bom>(existing) else {
            return false;
        };
        bom.metadata.component == Some(Self::component(&subject.project, "application"))
            && bom.components == Self::build_components(subject)
            && bom.dependencies == Self::build_dependencies(subject)
    }
}
