use anyhow::Result;

use super::build;
use super::render_markup;
use crate::configuration::ConfigKey;

#[test]
fn it_renders_markup_as_json() -> Result<()> {
    let res = render_markup("Hi *there*\n\n- **Maya**\n1. Check in")?;

    insta::assert_snapshot!(res, @r###"
    [
      {
        "Paragraph": [
          {
            "Literal": "Hi "
          },
          {
            "Italic": "there"
          }
        ]
      },
      "Spacer",
      {
        "Bullet": [
          {
            "Bold": "Maya"
          }
        ]
      },
      {
        "Ordered": {
          "numeral": "1",
          "spans": [
            {
              "Literal": "Check in"
            }
          ]
        }
      }
    ]
    "###);

    return Ok(());
}

#[test]
fn it_parses_chat_args() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "praxis",
        "--scope",
        "10-A",
        "--server-url",
        "http://praxis.local:5001",
    ])?;

    assert_eq!(
        matches.get_one::<String>(&ConfigKey::Scope.to_string()),
        Some(&"10-A".to_string())
    );
    assert_eq!(
        matches.get_one::<String>(&ConfigKey::ServerURL.to_string()),
        Some(&"http://praxis.local:5001".to_string())
    );

    return Ok(());
}

#[test]
fn it_requires_shell_for_completions() {
    let res = build().try_get_matches_from(vec!["praxis", "completions"]);
    assert!(res.is_err());
}
