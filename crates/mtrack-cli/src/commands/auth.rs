use mtrack_core::{TrackerApi, TrackerError};

use crate::app::AppContext;
use crate::cli::{LoginArgs, RegisterArgs, WhoamiArgs};
use crate::errors::CliError;
use crate::helpers::{prompt_password, prompt_username};
use crate::output::{print_whoami, whoami_json};
use crate::ui::{badge, blank_line, header, hint, print, receipt, Badge, OutputMode, Spinner};

pub fn handle_login(ctx: &AppContext, args: &LoginArgs) -> anyhow::Result<()> {
    let interactive = ctx.interactive();
    let username = prompt_username(interactive, args.username.as_deref())?;
    let password = prompt_password(interactive, false)?;

    let ui = ctx.ui_context(false, None);
    let api = ctx.api()?;
    let spinner = Spinner::start(&ui, "Signing in...");
    let result = api.login(&username, &password);
    spinner.finish();

    let session = result.map_err(|e| match e {
        TrackerError::Unauthorized(detail) => anyhow::Error::from(CliError::auth_failed_with_hint(
            format!("Login failed: {}", detail),
            "Hint: Check your username and password.",
        )),
        other => other.into(),
    })?;
    let store = ctx.session_store()?;
    store.save(&session)?;
    tracing::info!(username = %session.username, path = %store.path().display(), "signed in");

    if !ctx.quiet() {
        print(
            &ui,
            &receipt(
                &ui,
                &format!("Welcome {}", session.username),
                &[("Username", session.username.as_str())],
            ),
        );
        if ui.mode.is_pretty() {
            blank_line(&ui);
            print(&ui, &hint(&ui, "mtrack report"));
        }
    }
    Ok(())
}

pub fn handle_logout(ctx: &AppContext) -> anyhow::Result<()> {
    let removed = ctx.session_store()?.clear()?;
    tracing::info!(removed, "signed out");

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        match ui.mode {
            OutputMode::Pretty => {
                if removed {
                    print(&ui, &badge(&ui, Badge::Ok, "Signed out"));
                } else {
                    print(&ui, &badge(&ui, Badge::Info, "Not signed in"));
                }
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("signed_out={}", removed);
            }
        }
    }
    Ok(())
}

pub fn handle_register(ctx: &AppContext, args: &RegisterArgs) -> anyhow::Result<()> {
    let interactive = ctx.interactive();
    let username = prompt_username(interactive, args.username.as_deref())?;
    let password = prompt_password(interactive, true)?;

    let ui = ctx.ui_context(false, None);
    let api = ctx.api()?;
    let spinner = Spinner::start(&ui, "Processing...");
    let result = api.register(&username, &password);
    spinner.finish();
    result?;

    if !ctx.quiet() {
        print(
            &ui,
            &receipt(&ui, "Account created", &[("Username", username.as_str())]),
        );
        if ui.mode.is_pretty() {
            blank_line(&ui);
            print(
                &ui,
                &hint(&ui, &format!("mtrack login --username {}", username)),
            );
        }
    }
    Ok(())
}

pub fn handle_whoami(ctx: &AppContext, args: &WhoamiArgs) -> anyhow::Result<()> {
    let session = ctx.require_session()?;
    let api = ctx.api()?;
    let profile = api.user_profile(&session)?;
    let details = api.user_details(&session)?;

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        let output = serde_json::to_string_pretty(&whoami_json(&session, &profile, &details))?;
        println!("{}", output);
        return Ok(());
    }

    if !ctx.quiet() && ui.mode.is_pretty() {
        print(&ui, &header(&ui, "whoami", None));
        blank_line(&ui);
    }
    print_whoami(&ui, &session, &profile, &details);
    Ok(())
}
