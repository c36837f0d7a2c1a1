use html_escape::encode_double_quoted_attribute;

use crate::ConfigModel;
use crate::ProjectDefaults;

const INDENT: &str = "  ";

/// Render the model as a project file.
///
/// Every value is escaped for `&`, `<`, `>` and `"`. `$(Name)` references are
/// written untouched for the build host to resolve. Optional blocks are left
/// out entirely when they would be empty.
pub fn emit_project(model: &ConfigModel, defaults: &ProjectDefaults) -> String {
	let mut out = String::new();

	let root = &model.root_sdk;
	let root_attribute = match root.version.as_deref() {
		Some(version) => format!("{}/{version}", root.name),
		None => root.name.clone(),
	};
	line(&mut out, 0, &format!("<Project Sdk=\"{}\">", escape(&root_attribute)));
	out.push('\n');

	if !model.extra_sdks.is_empty() {
		for sdk in &model.extra_sdks {
			let element = match sdk.version.as_deref() {
				Some(version) => {
					format!(
						"<Sdk Name=\"{}\" Version=\"{}\" />",
						escape(&sdk.name),
						escape(version)
					)
				}
				None => format!("<Sdk Name=\"{}\" />", escape(&sdk.name)),
			};
			line(&mut out, 1, &element);
		}
		out.push('\n');
	}

	line(&mut out, 1, "<PropertyGroup>");
	line(&mut out, 2, "<OutputType>Exe</OutputType>");
	line(
		&mut out,
		2,
		&format!(
			"<TargetFramework>{}</TargetFramework>",
			escape(&defaults.target_framework)
		),
	);
	line(&mut out, 2, "<ImplicitUsings>enable</ImplicitUsings>");
	line(&mut out, 2, "<Nullable>enable</Nullable>");
	line(&mut out, 1, "</PropertyGroup>");
	out.push('\n');

	if !model.properties.is_empty() {
		line(&mut out, 1, "<PropertyGroup>");
		for property in &model.properties {
			let name = escape(&property.name);
			line(
				&mut out,
				2,
				&format!("<{name}>{}</{name}>", escape(&property.value)),
			);
		}
		line(&mut out, 1, "</PropertyGroup>");
		out.push('\n');
	}

	if !model.packages.is_empty() {
		line(&mut out, 1, "<ItemGroup>");
		for package in &model.packages {
			let element = match package.version.as_deref() {
				Some(version) => {
					format!(
						"<PackageReference Include=\"{}\" Version=\"{}\" />",
						escape(&package.name),
						escape(version)
					)
				}
				None => format!("<PackageReference Include=\"{}\" />", escape(&package.name)),
			};
			line(&mut out, 2, &element);
		}
		line(&mut out, 1, "</ItemGroup>");
		out.push('\n');
	}

	line(&mut out, 0, "</Project>");

	out
}

fn line(out: &mut String, depth: usize, text: &str) {
	out.push_str(&INDENT.repeat(depth));
	out.push_str(text);
	out.push('\n');
}

/// `&`, `<`, `>` and `"` in a single pass, so nothing is escaped twice.
fn escape(value: &str) -> std::borrow::Cow<'_, str> {
	encode_double_quoted_attribute(value)
}
