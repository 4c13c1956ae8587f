use super::*;

#[test]
fn parses_login_with_password_containing_spaces() {
    assert_eq!(
        parse_command("login admin@example.com  open sesame "),
        Ok(ConsoleCommand::Login {
            username: "admin@example.com".into(),
            password: "open sesame".into(),
        })
    );
}

#[test]
fn login_requires_both_credentials() {
    assert_eq!(
        parse_command("login admin"),
        Err(CommandError::Usage("login <username> <password>"))
    );
}

#[test]
fn table_rows_are_one_based() {
    assert_eq!(
        parse_command("edit 1"),
        Ok(ConsoleCommand::Open {
            mode: ModalMode::Edit,
            row: Some(0),
        })
    );
    assert_eq!(
        parse_command("delete 42"),
        Ok(ConsoleCommand::Open {
            mode: ModalMode::Delete,
            row: Some(41),
        })
    );
    assert_eq!(
        parse_command("edit 0"),
        Err(CommandError::BadIndex("0".into()))
    );
    assert_eq!(
        parse_command("delete first"),
        Err(CommandError::BadIndex("first".into()))
    );
}

#[test]
fn set_keeps_the_rest_of_the_line_as_value() {
    assert_eq!(
        parse_command("set description  Roasted green tea, 100g"),
        Ok(ConsoleCommand::Set {
            field: FormField::Description,
            value: "Roasted green tea, 100g".into(),
        })
    );
    assert_eq!(
        parse_command("set colour red"),
        Err(CommandError::Field(UnknownField("colour".into())))
    );
}

#[test]
fn parses_image_subcommands() {
    assert_eq!(parse_command("image add"), Ok(ConsoleCommand::ImageAdd));
    assert_eq!(parse_command("image remove 2"), Ok(ConsoleCommand::ImageRemove(2)));
    assert_eq!(
        parse_command("image set 0 https://img.example.com/a.png"),
        Ok(ConsoleCommand::ImageSet(0, "https://img.example.com/a.png".into()))
    );
    assert!(matches!(
        parse_command("image rotate"),
        Err(CommandError::Usage(_))
    ));
}

#[test]
fn blank_and_unknown_lines() {
    assert_eq!(parse_command("   "), Err(CommandError::Empty));
    assert_eq!(
        parse_command("dance"),
        Err(CommandError::Unknown("dance".into()))
    );
}
