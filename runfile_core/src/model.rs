use serde::Serialize;

use crate::DirectiveKind;
use crate::DirectiveRecord;

/// An SDK reference: `Microsoft.NET.Sdk` or `Aspire.AppHost.Sdk` with an
/// optional version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SdkReference {
	pub name: String,
	pub version: Option<String>,
}

/// A project property such as `LangVersion = preview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
	pub name: String,
	pub value: String,
}

/// A package reference with an optional version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReference {
	pub name: String,
	pub version: Option<String>,
}

/// The build configuration collected from the directive region.
///
/// Every list keeps directives in the order they were written, including
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigModel {
	/// The first `#:sdk` directive, or the default SDK when there is none.
	pub root_sdk: SdkReference,
	/// Every `#:sdk` directive after the first.
	pub extra_sdks: Vec<SdkReference>,
	pub properties: Vec<Property>,
	pub packages: Vec<PackageReference>,
}

impl ConfigModel {
	/// Fold directive records into a model. Never fails and never reorders or
	/// removes anything.
	pub fn build<'a>(
		records: impl IntoIterator<Item = &'a DirectiveRecord>,
		default_sdk: &str,
	) -> Self {
		let mut root_sdk = None;
		let mut extra_sdks = Vec::new();
		let mut properties = Vec::new();
		let mut packages = Vec::new();

		for record in records {
			match record.kind {
				DirectiveKind::Sdk => {
					let sdk = SdkReference {
						name: record.name.clone(),
						version: record.value().map(ToString::to_string),
					};

					if root_sdk.is_none() {
						root_sdk = Some(sdk);
					} else {
						extra_sdks.push(sdk);
					}
				}
				DirectiveKind::Property => {
					properties.push(Property {
						name: record.name.clone(),
						value: record.value.clone(),
					});
				}
				DirectiveKind::Package => {
					packages.push(PackageReference {
						name: record.name.clone(),
						version: record.value().map(ToString::to_string),
					});
				}
			}
		}

		Self {
			root_sdk: root_sdk.unwrap_or_else(|| {
				SdkReference {
					name: default_sdk.to_string(),
					version: None,
				}
			}),
			extra_sdks,
			properties,
			packages,
		}
	}
}
