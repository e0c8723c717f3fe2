use crate::auth::services;
use crate::routes::Route;
use crate::state::AppState;
use crate::ui::{self, Nav};

/// Sign-in screen: email + password, then back to the storefront.
pub async fn login(state: &AppState) -> anyhow::Result<Nav> {
    println!();
    println!("-- Sign In -- (blank email to go back)");
    loop {
        let Some(email) = ui::prompt("email")? else {
            return Ok(None);
        };
        if email.is_empty() {
            return Ok(Some(Route::Store));
        }
        if let Some(nav) = ui::common_command(state, &email) {
            return Ok(nav);
        }
        let Some(password) = ui::prompt("password")? else {
            return Ok(None);
        };

        match services::login(&state.api, &state.session, &email, &password).await {
            Ok(user) => {
                println!("Welcome back, {}!", user.name);
                return Ok(Some(Route::Store));
            }
            Err(err) => println!("Sign in failed: {err}"),
        }
    }
}

/// Registration screen; a created account is sent to the sign-in screen.
pub async fn register(state: &AppState) -> anyhow::Result<Nav> {
    println!();
    println!("-- Join the Club -- (blank name to go back)");
    loop {
        let Some(name) = ui::prompt("full name")? else {
            return Ok(None);
        };
        if name.is_empty() {
            return Ok(Some(Route::Store));
        }
        if let Some(nav) = ui::common_command(state, &name) {
            return Ok(nav);
        }
        let Some(email) = ui::prompt("email")? else {
            return Ok(None);
        };
        let Some(password) = ui::prompt("password")? else {
            return Ok(None);
        };

        if let Err(err) = services::validate_registration(&name, &email, &password) {
            println!("{err}");
            continue;
        }
        match services::register(&state.api, &name, &email, &password).await {
            Ok(()) => {
                println!("Account created. Please sign in.");
                return Ok(Some(Route::Login));
            }
            Err(err) => println!("Registration failed: {err}"),
        }
    }
}
