use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, names};

const BUTTON: &str = r#"interface P {
    color?: string;
    text: string;
}

const Btn = (props: P): JSX.Element => <button>{props.text}</button>;

export { Btn };
"#;

#[test]
fn test_prints_types_then_components() -> Result<()> {
    let test = CliTest::with_file("button.tsx", BUTTON)?;

    assert_cmd_snapshot!(test.command().arg("button.tsx"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {
        "types": [
            {
                "name": "P",
                "properties": [
                    {
                        "name": "color",
                        "intrinsicType": "string",
                        "complexType": null,
                        "optional": true
                    },
                    {
                        "name": "text",
                        "intrinsicType": "string",
                        "complexType": null,
                        "optional": false
                    }
                ]
            }
        ],
        "components": [
            {
                "name": "Btn",
                "propsSchemaName": "P"
            }
        ]
    }

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_directory_input_is_expanded() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/b/Card.tsx",
        "export const Card = (props: { title: string }) => <div />;\n",
    )?;
    test.write_file(
        "src/a/Avatar.tsx",
        "export function Avatar(props: { size: number }) {\n    return <img />;\n}\n",
    )?;
    test.write_file(
        "src/a/Avatar.test.tsx",
        "export const AvatarTest = () => <div />;\n",
    )?;
    test.write_file("src/styles.css", "body {}\n")?;

    let document = test.extract(&["src"])?;

    assert_eq!(names(&document, "components"), vec!["Avatar", "Card"]);

    Ok(())
}

#[test]
fn test_dedupe_flag() -> Result<()> {
    let test = CliTest::with_file(
        "shared.tsx",
        r#"interface Shared { label: string }
export const A = (props: Shared) => <div />;
export const B = (props: Shared) => <div />;
"#,
    )?;

    let repeated = test.extract(&["shared.tsx"])?;
    let deduped = test.extract(&["shared.tsx", "--dedupe"])?;

    assert_eq!(names(&repeated, "types"), vec!["Shared", "Shared"]);
    assert_eq!(names(&deduped, "types"), vec!["Shared"]);

    Ok(())
}

#[test]
fn test_missing_file_exits_with_error() -> Result<()> {
    let test = CliTest::new()?;
    let root = regex::escape(&test.root().display().to_string());

    insta::with_settings!({filters => vec![(root.as_str(), "[TEMP_DIR]")]}, {
        assert_cmd_snapshot!(test.command().arg("missing.tsx"), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        error: Failed to read [TEMP_DIR]/missing.tsx: No such file or directory (os error 2)
        ");
    });

    Ok(())
}

#[test]
fn test_unresolved_import_exits_with_error() -> Result<()> {
    let test = CliTest::with_file(
        "app.tsx",
        "import { Gone } from \"./gone\";\nexport const App = () => <Gone />;\n",
    )?;

    let output = test.run(&["app.tsx"])?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("./gone"), "stderr: {stderr}");

    Ok(())
}

#[test]
fn test_paths_are_required() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&[])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    Ok(())
}
