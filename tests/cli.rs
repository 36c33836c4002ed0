use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "id,first_name,last_name,home,mobile,work\n";

fn convert(input: &Path, output: &Path) -> std::process::Output {
    cargo_bin_cmd!("csv2fritz")
        .arg(input)
        .arg(output)
        .env_remove("RUST_LOG")
        .output()
        .expect("run command")
}

fn convert_str(temp: &TempDir, csv: &str) -> String {
    let input = temp.path().join("contacts.csv");
    let output = temp.path().join("phonebook.xml");
    fs::write(&input, csv).expect("write input");

    let result = convert(&input, &output);
    assert!(result.status.success(), "command failed: {:?}", result);
    fs::read_to_string(&output).expect("read output")
}

fn without_mod_time(xml: &str) -> String {
    xml.lines()
        .filter(|line| !line.trim_start().starts_with("<mod_time>"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn cli_converts_contacts() {
    let temp = TempDir::new().expect("temp dir");
    let xml = convert_str(
        &temp,
        &format!("{HEADER}7,Jane,Doe,5551234,,5559999\n8,John,,,,\n9,Ada,Lovelace,1,2,3\n"),
    );

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<phonebooks>\n    <phonebook>\n"));
    assert!(xml.ends_with("    </phonebook>\n</phonebooks>\n"));
    assert_eq!(xml.matches("<contact>").count(), 3);

    let ids: Vec<_> = xml
        .lines()
        .filter_map(|line| line.trim().strip_prefix("<uniqueid>"))
        .filter_map(|rest| rest.strip_suffix("</uniqueid>"))
        .collect();
    assert_eq!(ids, ["7", "8", "9"]);

    assert!(xml.contains("<realName>Jane Doe</realName>"));
    assert!(xml.contains("<realName>John</realName>"));
    assert!(xml.contains(r#"<telephony nid="2">"#));
    assert!(xml.contains(r#"<number type="home" prio="1" id="0">5551234</number>"#));
    assert!(xml.contains(r#"<number type="work" prio="0" id="1">5559999</number>"#));
    assert!(xml.contains(r#"<telephony nid="0">"#));
    assert!(xml.contains(r#"<number type="mobile" prio="0" id="1">2</number>"#));

    let mod_time = xml
        .lines()
        .find_map(|line| line.trim().strip_prefix("<mod_time>"))
        .and_then(|rest| rest.strip_suffix("</mod_time>"))
        .expect("mod_time");
    assert!(mod_time.parse::<u64>().expect("numeric mod_time") > 1_500_000_000);
}

#[test]
fn cli_output_is_stable_across_runs() {
    let temp = TempDir::new().expect("temp dir");
    let csv = format!("{HEADER}1,A,B,111,,\n2,C,,,222,333\n");

    let first = convert_str(&temp, &csv);
    let second = convert_str(&temp, &csv);

    assert_eq!(without_mod_time(&first), without_mod_time(&second));
}

#[test]
fn cli_skips_short_rows() {
    let temp = TempDir::new().expect("temp dir");
    let xml = convert_str(&temp, &format!("{HEADER}1,A,B,111,,\n2,Too,Short\n3,C,D,,,333\n"));

    assert_eq!(xml.matches("<contact>").count(), 2);
    assert!(!xml.contains("<uniqueid>2</uniqueid>"));
}

#[test]
fn cli_header_only_input() {
    let temp = TempDir::new().expect("temp dir");
    let xml = convert_str(&temp, HEADER);

    assert_eq!(xml.matches("<contact>").count(), 0);
    assert!(xml.contains("<phonebook>"));
}

#[test]
fn cli_missing_input_fails() {
    let temp = TempDir::new().expect("temp dir");
    let output = temp.path().join("phonebook.xml");

    let result = convert(&temp.path().join("missing.csv"), &output);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("missing.csv"));
    assert!(!output.exists());
}

#[test]
fn cli_unwritable_output_fails() {
    let temp = TempDir::new().expect("temp dir");
    let input = temp.path().join("contacts.csv");
    fs::write(&input, format!("{HEADER}1,A,B,111,,\n")).expect("write input");

    let result = convert(&input, &temp.path().join("no-such-dir").join("phonebook.xml"));

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("cannot write"));
}

#[test]
fn cli_requires_two_arguments() {
    let result = cargo_bin_cmd!("csv2fritz")
        .arg("only-one.csv")
        .output()
        .expect("run command");

    assert!(!result.status.success());
}
