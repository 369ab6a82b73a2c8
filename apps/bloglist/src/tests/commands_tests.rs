use super::*;

#[test]
fn parses_login_with_and_without_password() {
    assert_eq!(
        parse("login alice sekret"),
        Ok(Some(Command::Login {
            username: "alice".to_string(),
            password: Some("sekret".to_string()),
        }))
    );
    assert_eq!(
        parse("  LOGIN alice "),
        Ok(Some(Command::Login {
            username: "alice".to_string(),
            password: None,
        }))
    );
    assert_eq!(
        parse("login"),
        Err(CommandError::Usage("login <username> [password]"))
    );
}

#[test]
fn targets_are_positions_or_ids() {
    assert_eq!(parse("like #3"), Ok(Some(Command::Like(Target::Position(3)))));
    assert_eq!(
        parse("like 2"),
        Ok(Some(Command::Like(Target::Id(BlogId::from("2")))))
    );
    assert_eq!(
        parse("delete 5a422a851b54a676234d17f7"),
        Ok(Some(Command::Delete(Target::Id(BlogId::from(
            "5a422a851b54a676234d17f7"
        )))))
    );
    assert_eq!(parse("like #0"), Err(CommandError::Usage("like <#n|id>")));
    assert_eq!(parse("like #x"), Err(CommandError::Usage("like <#n|id>")));
    assert_eq!(parse("rm"), Err(CommandError::Usage("delete <#n|id>")));
}

#[test]
fn blank_and_unknown_lines() {
    assert_eq!(parse("   "), Ok(None));
    assert_eq!(
        parse("publish"),
        Err(CommandError::Unknown("publish".to_string()))
    );
    assert_eq!(parse("logout now"), Err(CommandError::Usage("logout")));
    assert_eq!(parse("login a b c"), Err(CommandError::Usage("login <username> [password]")));
}

#[test]
fn only_login_help_and_quit_work_logged_out() {
    let open = ["login alice", "help", "quit"];
    let gated = ["logout", "list", "new", "cancel", "create", "like #1", "delete #1"];
    for line in open {
        let command = parse(line).expect("parse").expect("command");
        assert!(!command.requires_login(), "{line}");
    }
    for line in gated {
        let command = parse(line).expect("parse").expect("command");
        assert!(command.requires_login(), "{line}");
    }
}
