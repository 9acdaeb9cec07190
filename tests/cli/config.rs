use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, names};

const SHARED: &str = r#"interface Shared { label: string }
export const A = (props: Shared) => <div />;
export const B = (props: Shared) => <div />;
"#;

#[test]
fn test_config_enables_dedupe() -> Result<()> {
    let test = CliTest::with_file("shared.tsx", SHARED)?;
    test.write_file(".propscanrc.json", r#"{ "dedupeSchemas": true }"#)?;

    let document = test.extract(&["shared.tsx"])?;

    assert_eq!(names(&document, "types"), vec!["Shared"]);

    Ok(())
}

#[test]
fn test_config_ignores_apply_to_directories() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".propscanrc.json",
        r#"{ "ignores": ["**/stories/**"], "ignoreTestFiles": false }"#,
    )?;
    test.write_file("src/Card.tsx", "export const Card = () => <div />;\n")?;
    test.write_file("src/Card.test.tsx", "export const CardTest = () => <div />;\n")?;
    test.write_file("src/stories/Card.tsx", "export const Story = () => <div />;\n")?;

    let document = test.extract(&["src"])?;

    assert_eq!(names(&document, "components"), vec!["CardTest", "Card"]);

    Ok(())
}

#[test]
fn test_invalid_config_exits_with_error() -> Result<()> {
    let test = CliTest::with_file("shared.tsx", SHARED)?;
    test.write_file(".propscanrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.run(&["shared.tsx"])?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("ignores"), "stderr: {stderr}");
    assert!(test.root().join(".propscanrc.json").exists());

    Ok(())
}
