mod common;

use emdown_core::AnyEmptyResult;
use rstest::rstest;

#[rstest]
#[case::root("emdown.toml")]
#[case::hidden(".emdown.toml")]
#[case::config_dir(".config/emdown.toml")]
fn discovers_config_in_working_directory(#[case] candidate: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let path = tmp.path().join(candidate);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(&path, "[print]\nindent = 3\n")?;

	common::emdown_cmd()
		.current_dir(tmp.path())
		.write_stdin("* a")
		.assert()
		.success()
		.stdout("<ul>\n   <li>a</li>\n</ul>\n");

	Ok(())
}

#[test]
fn explicit_config_path() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let path = tmp.path().join("custom.toml");
	std::fs::write(&path, "[print]\ntabs = true\n")?;

	common::emdown_cmd()
		.current_dir(tmp.path())
		.arg("--config")
		.arg(&path)
		.write_stdin("* a")
		.assert()
		.success()
		.stdout("<ul>\n\t<li>a</li>\n</ul>\n");

	Ok(())
}

#[test]
fn flags_override_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("emdown.toml"), "[print]\nindent = 8\n")?;

	common::emdown_cmd()
		.current_dir(tmp.path())
		.arg("--indent")
		.arg("1")
		.write_stdin("* a")
		.assert()
		.success()
		.stdout("<ul>\n <li>a</li>\n</ul>\n");

	Ok(())
}

#[test]
fn missing_explicit_config_reports_diagnostic() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::emdown_cmd()
		.current_dir(tmp.path())
		.arg("--config")
		.arg(tmp.path().join("nope.toml"))
		.write_stdin("x")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("emdown::config_not_found"));

	Ok(())
}

#[test]
fn invalid_config_reports_diagnostic() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("emdown.toml"), "[print]\nindent = \"wide\"\n")?;

	common::emdown_cmd()
		.current_dir(tmp.path())
		.write_stdin("x")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("emdown::config_parse"));

	Ok(())
}
