use std::io::{self, BufRead, Write};

use crate::routes::{can_access, fallback, Route};
use crate::state::AppState;
use crate::{auth, inventory, orders, store, users};

/// Outcome of one screen interaction: navigate somewhere, or quit the app.
pub type Nav = Option<Route>;

/// Reads one trimmed line from stdin; `None` on end of input.
pub fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{label}> ");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Blocking yes/no gate in front of every destructive action. Anything but
/// an explicit `y` declines and leaves all state untouched.
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

/// Permissive numeric parsing, mirroring the storefront's forms: garbage
/// becomes the default, nothing is range-checked client-side.
pub fn parse_or_default<T: std::str::FromStr + Default>(input: &str) -> T {
    input.trim().parse().unwrap_or_default()
}

/// Commands every screen understands: `/path` navigation, `logout`, `quit`.
/// Returns `None` when the input is screen-specific.
pub fn common_command(state: &AppState, input: &str) -> Option<Nav> {
    if input.starts_with('/') {
        return Some(Some(Route::parse(input)));
    }
    match input {
        "quit" | "exit" | "q" => Some(None),
        "logout" => {
            state.session.logout();
            println!("Signed out.");
            Some(Some(Route::Store))
        }
        _ => None,
    }
}

fn header(state: &AppState, route: Route) {
    let session = state.session.current();
    println!();
    println!("== PIAR POINT ==  {}", route.path());
    match &session.user {
        Some(user) => {
            let mut nav = String::from("/  /orders");
            if session.is_admin() {
                nav.push_str("  /inventory  /admin");
            }
            println!(
                "signed in as {} ({})   nav: {nav}  logout  quit",
                user.name, user.role
            );
        }
        None => println!("not signed in   nav: /  /login  /register  quit"),
    }
}

/// The navigation loop: route guard, fallback redirects, one screen per
/// route. Runs until a screen reports quit or stdin closes.
pub async fn run(state: AppState) -> anyhow::Result<()> {
    let mut route = Route::Store;
    loop {
        let session = state.session.current();
        if !can_access(&session, route) {
            let target = fallback(&session, route);
            if target == Route::Login {
                println!("Please sign in first.");
            }
            route = target;
        }
        header(&state, route);
        let nav = match route {
            Route::Store => store::screen::run(&state).await?,
            Route::Login => auth::screen::login(&state).await?,
            Route::Register => auth::screen::register(&state).await?,
            Route::Orders => orders::screen::run(&state).await?,
            Route::Inventory => inventory::screen::run(&state).await?,
            Route::Admin => users::screen::run(&state).await?,
        };
        match nav {
            Some(next) => route = next,
            None => break,
        }
    }
    Ok(())
}
