use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["synvo"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_services_browse_defaults() {
    let cli = Cli::try_parse_from(["synvo", "services", "browse"]).expect("expected valid cli args");
    if let Some(Commands::Services {
        command:
            ServicesCommands::Browse {
                query,
                category,
                location,
                min_price,
                max_price,
                sort,
                page,
                page_size,
                simple,
            },
    }) = cli.command
    {
        assert_eq!(query, "");
        assert_eq!(category, "All");
        assert_eq!(location, "All");
        assert_eq!(min_price, None);
        assert_eq!(max_price, None);
        assert_eq!(sort, "default");
        assert_eq!(page, 1);
        assert_eq!(page_size, None);
        assert!(!simple);
    } else {
        panic!("unexpected command variant");
    }
}

#[test]
fn parses_services_browse_with_filters() {
    let cli = Cli::try_parse_from([
        "synvo",
        "services",
        "browse",
        "--query",
        "logo",
        "--category",
        "Design",
        "--min-price",
        "50",
        "--max-price",
        "200",
        "--sort",
        "price-low",
        "--page",
        "2",
        "--page-size",
        "9",
    ])
    .unwrap();
    if let Some(Commands::Services {
        command:
            ServicesCommands::Browse {
                query,
                category,
                min_price,
                max_price,
                sort,
                page,
                page_size,
                ..
            },
    }) = cli.command
    {
        assert_eq!(query, "logo");
        assert_eq!(category, "Design");
        assert_eq!(min_price.as_deref(), Some("50"));
        assert_eq!(max_price.as_deref(), Some("200"));
        assert_eq!(sort, "price-low");
        assert_eq!(page, 2);
        assert_eq!(page_size, Some(9));
    } else {
        panic!("unexpected command variant");
    }
}

#[test]
fn parses_services_browse_simple_flag() {
    let cli = Cli::try_parse_from(["synvo", "services", "browse", "--simple"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Services {
            command: ServicesCommands::Browse { simple: true, .. }
        })
    ));
}

#[test]
fn parses_services_featured_default_limit() {
    let cli = Cli::try_parse_from(["synvo", "services", "featured"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Services {
            command: ServicesCommands::Featured { limit: 6 }
        })
    ));
}

#[test]
fn parses_services_featured_with_limit() {
    let cli = Cli::try_parse_from(["synvo", "services", "featured", "--limit", "3"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Services {
            command: ServicesCommands::Featured { limit: 3 }
        })
    ));
}

#[test]
fn parses_services_show_positional_id() {
    let cli = Cli::try_parse_from(["synvo", "services", "show", "64f1aa"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Services {
            command: ServicesCommands::Show { ref id }
        }) if id == "64f1aa"
    ));
}

#[test]
fn parses_services_add_with_defaults() {
    let cli = Cli::try_parse_from([
        "synvo",
        "services",
        "add",
        "--name",
        "Logo Design",
        "--description",
        "Brand identity package",
        "--price",
        "150",
        "--category",
        "Design",
        "--location",
        "Remote",
    ])
    .unwrap();
    if let Some(Commands::Services {
        command:
            ServicesCommands::Add {
                name,
                price,
                image,
                status,
                ..
            },
    }) = cli.command
    {
        assert_eq!(name, "Logo Design");
        assert_eq!(price, "150");
        assert_eq!(image, "");
        assert_eq!(status, "Active");
    } else {
        panic!("unexpected command variant");
    }
}

#[test]
fn services_add_requires_name() {
    let result = Cli::try_parse_from([
        "synvo",
        "services",
        "add",
        "--description",
        "Brand identity package",
        "--price",
        "150",
        "--category",
        "Design",
        "--location",
        "Remote",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_services_update_partial_flags() {
    let cli = Cli::try_parse_from([
        "synvo",
        "services",
        "update",
        "64f1aa",
        "--price",
        "175",
        "--status",
        "Paused",
    ])
    .unwrap();
    if let Some(Commands::Services {
        command:
            ServicesCommands::Update {
                id,
                title,
                price,
                status,
                ..
            },
    }) = cli.command
    {
        assert_eq!(id, "64f1aa");
        assert_eq!(title, None);
        assert_eq!(price.as_deref(), Some("175"));
        assert_eq!(status.as_deref(), Some("Paused"));
    } else {
        panic!("unexpected command variant");
    }
}

#[test]
fn parses_services_delete() {
    let cli = Cli::try_parse_from(["synvo", "services", "delete", "64f1aa"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Services {
            command: ServicesCommands::Delete { ref id }
        }) if id == "64f1aa"
    ));
}

#[test]
fn parses_services_mine() {
    let cli = Cli::try_parse_from(["synvo", "services", "mine"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Services {
            command: ServicesCommands::Mine
        })
    ));
}

#[test]
fn parses_bookings_list() {
    let cli = Cli::try_parse_from(["synvo", "bookings", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Bookings {
            command: BookingsCommands::List
        })
    ));
}

#[test]
fn parses_bookings_create() {
    let cli = Cli::try_parse_from([
        "synvo",
        "bookings",
        "create",
        "64f1aa",
        "--date",
        "2026-09-01",
        "--notes",
        "morning slot please",
    ])
    .unwrap();
    if let Some(Commands::Bookings {
        command:
            BookingsCommands::Create {
                service_id,
                date,
                notes,
            },
    }) = cli.command
    {
        assert_eq!(service_id, "64f1aa");
        assert_eq!(date, "2026-09-01");
        assert_eq!(notes, "morning slot please");
    } else {
        panic!("unexpected command variant");
    }
}

#[test]
fn parses_bookings_cancel() {
    let cli = Cli::try_parse_from(["synvo", "bookings", "cancel", "b77"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Bookings {
            command: BookingsCommands::Cancel { ref booking_id }
        }) if booking_id == "b77"
    ));
}

#[test]
fn parses_bookings_review() {
    let cli =
        Cli::try_parse_from(["synvo", "bookings", "review", "b77", "--rating", "5"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Bookings {
            command: BookingsCommands::Review {
                ref booking_id,
                rating: 5,
                ref comment,
            }
        }) if booking_id == "b77" && comment.is_empty()
    ));
}

#[test]
fn bookings_review_rejects_non_numeric_rating() {
    let result = Cli::try_parse_from(["synvo", "bookings", "review", "b77", "--rating", "five"]);
    assert!(result.is_err());
}

#[test]
fn parses_dashboard() {
    let cli = Cli::try_parse_from(["synvo", "dashboard"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Dashboard)));
}

#[test]
fn parses_admin_stats() {
    let cli = Cli::try_parse_from(["synvo", "admin", "stats"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::Stats
        })
    ));
}

#[test]
fn parses_admin_users() {
    let cli = Cli::try_parse_from(["synvo", "admin", "users"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::Users
        })
    ));
}

#[test]
fn parses_admin_set_role() {
    let cli = Cli::try_parse_from([
        "synvo",
        "admin",
        "set-role",
        "--email",
        "kai@example.com",
        "--role",
        "admin",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Admin {
            command: AdminCommands::SetRole { ref email, ref role }
        }) if email == "kai@example.com" && role == "admin"
    ));
}

#[test]
fn parses_profile_show() {
    let cli = Cli::try_parse_from(["synvo", "profile", "show"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Profile {
            command: ProfileCommands::Show
        })
    ));
}

#[test]
fn parses_profile_update_flags() {
    let cli = Cli::try_parse_from([
        "synvo",
        "profile",
        "update",
        "--name",
        "Mina",
        "--photo-url",
        "https://example.com/me.png",
    ])
    .unwrap();
    if let Some(Commands::Profile {
        command: ProfileCommands::Update { name, photo_url },
    }) = cli.command
    {
        assert_eq!(name.as_deref(), Some("Mina"));
        assert_eq!(photo_url.as_deref(), Some("https://example.com/me.png"));
    } else {
        panic!("unexpected command variant");
    }
}
