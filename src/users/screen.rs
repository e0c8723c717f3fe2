use crate::state::AppState;
use crate::ui::{self, Nav};
use crate::users::view::UserAdmin;

fn render(admin: &UserAdmin) {
    println!();
    println!("-- User Management --");
    for user in &admin.users {
        println!(
            "  #{:<4} {:<20} {:<28} {}",
            user.id, user.name, user.email, user.role
        );
    }
}

/// Account admin: list and confirmed delete.
pub async fn run(state: &AppState) -> anyhow::Result<Nav> {
    let mut admin = UserAdmin::new();
    println!("Loading users...");
    if let Err(err) = admin.load(&state.api).await {
        println!("Could not load users: {err}");
    }
    render(&admin);
    println!("(list | del <id>)");

    loop {
        let Some(input) = ui::prompt("admin")? else {
            return Ok(None);
        };
        if let Some(nav) = ui::common_command(state, &input) {
            return Ok(nav);
        }

        let mut parts = input.split_whitespace();
        match (parts.next(), parts.next()) {
            (None, _) | (Some("list"), _) => render(&admin),
            (Some("del"), Some(id)) => {
                let id: i64 = ui::parse_or_default(id);
                if admin.user(id).is_none() {
                    println!("No user #{id}.");
                    continue;
                }
                if !ui::confirm("Are you sure you want to delete this user?")? {
                    continue;
                }
                match admin.delete(&state.api, id).await {
                    Ok(()) => render(&admin),
                    Err(err) => println!("Failed to delete user: {err}"),
                }
            }
            _ => println!("Unknown command; try `list` or `del <id>`."),
        }
    }
}
