use crate::cli::{FieldArgs, OutputFormat};
use crate::output::{output_result, output_table};
use crate::router::Route;
use crate::views::{is_confirmed, CreateView, DeleteView, ListState, ListView, SubmitOutcome, UpdateView};
use anyhow::{anyhow, bail, Context, Result};
use std::io::{BufRead, IsTerminal, Write};
use tracing::info;
use user_core::UserApi;

pub fn handle_list(client: &dyn UserApi, format: OutputFormat) -> Result<()> {
    let mut view = ListView::new();
    view.activate(client);
    render_list(&view, format)
}

fn render_list(view: &ListView, format: OutputFormat) -> Result<()> {
    if let ListState::Failed(message) = view.state() {
        return Err(anyhow!("{}", message)).context("Failed to list users");
    }

    if let Some(message) = view.error_message() {
        eprintln!("Warning: {}", message);
    }
    output_table(view.users(), &view.rows(), format);
    Ok(())
}

pub fn handle_get(client: &dyn UserApi, id: i64, format: OutputFormat) -> Result<()> {
    let user = client
        .get_user(id)
        .with_context(|| format!("Failed to fetch user {}", id))?;

    output_result(&user, format);
    Ok(())
}

pub fn handle_create(client: &dyn UserApi, fields: &FieldArgs, format: OutputFormat) -> Result<()> {
    let mut view = CreateView::new();
    view.form.patch(&fields.to_patch());

    match view.submit(client) {
        SubmitOutcome::Ignored(violations) => {
            bail!("Form is invalid, nothing was submitted: {}", violations)
        }
        SubmitOutcome::Saved { user, next } => {
            eprintln!("Created user: {} ({})", user.user_name, user.user_id);
            navigate(client, next, format)
        }
        SubmitOutcome::Failed => Err(anyhow!("{}", view.error_message().unwrap_or_default()))
            .context("Failed to create user"),
    }
}

pub fn handle_update(
    client: &dyn UserApi,
    id: i64,
    fields: &FieldArgs,
    format: OutputFormat,
) -> Result<()> {
    let mut view = UpdateView::for_route(Route::UpdateUser(id))
        .ok_or_else(|| anyhow!("Not an update route"))?;
    view.activate(client)
        .with_context(|| format!("Failed to fetch user {}", id))?;

    // Flags override what the server sent; everything else stays pre-filled
    view.form.patch(&fields.to_patch());

    match view.submit(client) {
        SubmitOutcome::Ignored(violations) => {
            bail!("Form is invalid, nothing was submitted: {}", violations)
        }
        SubmitOutcome::Saved { user, next } => {
            eprintln!("Updated user: {} ({})", user.user_name, user.user_id);
            navigate(client, next, format)
        }
        SubmitOutcome::Failed => Err(anyhow!("{}", view.error_message().unwrap_or_default()))
            .with_context(|| format!("Failed to update user {}", id)),
    }
}

pub fn handle_delete(client: &dyn UserApi, id: i64, yes: bool, format: OutputFormat) -> Result<()> {
    let view = DeleteView::new(id);

    if !yes && std::io::stdin().is_terminal() && !ask(&view.prompt())? {
        eprintln!("Aborted.");
        return Ok(());
    }

    let mut list = ListView::new();
    view.confirm(client, &mut list)
        .with_context(|| format!("Failed to delete user {}", id))?;

    eprintln!("Deleted user: {}", id);
    render_list(&list, format)
}

fn ask(prompt: &str) -> Result<bool> {
    eprint!("{}", prompt);
    std::io::stderr().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_confirmed(&answer))
}

/// Show the view behind `route`
pub fn navigate(client: &dyn UserApi, route: Route, format: OutputFormat) -> Result<()> {
    info!("navigating to {}", route);
    match route {
        Route::Users => handle_list(client, format),
        Route::UpdateUser(id) => handle_get(client, id, format),
        Route::CreateUser => {
            eprintln!("Use 'useradm create --help' to see the form fields.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_core::{User, UserStatus};
    use user_mock::{Method, MockClient};

    fn testuser_fields() -> FieldArgs {
        FieldArgs {
            user_name: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            email: Some("testuser@example.com".to_string()),
            status: Some("A".to_string()),
            department: Some("Engineering".to_string()),
        }
    }

    fn seeded() -> MockClient {
        MockClient::new(vec![User {
            user_id: 100,
            user_name: "testuser1".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "testuser1@example.com".to_string(),
            user_status: UserStatus::Active,
            department: "Engineering".to_string(),
        }])
    }

    #[test]
    fn create_then_navigates_to_list() {
        let api = MockClient::empty();
        handle_create(&api, &testuser_fields(), OutputFormat::Json).unwrap();
        assert_eq!(api.methods(), vec![Method::Create, Method::List]);
    }

    #[test]
    fn invalid_create_sends_nothing() {
        let api = MockClient::empty();
        let mut fields = testuser_fields();
        fields.email = Some("nope".to_string());

        let err = handle_create(&api, &fields, OutputFormat::Json).unwrap_err();

        assert!(err.to_string().contains("email must be a valid email address"));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn rejected_create_reports_server_body() {
        let api = MockClient::empty();
        api.fail_next(Method::Create, 409, "username already exists");

        let err = handle_create(&api, &testuser_fields(), OutputFormat::Json).unwrap_err();

        assert_eq!(
            format!("{:#}", err),
            "Failed to create user: username already exists"
        );
        assert_eq!(api.methods(), vec![Method::Create]);
    }

    #[test]
    fn update_fetches_patches_submits_and_lists() {
        let api = seeded();
        let fields = FieldArgs {
            department: Some("Research".to_string()),
            ..Default::default()
        };

        handle_update(&api, 100, &fields, OutputFormat::Json).unwrap();

        assert_eq!(
            api.methods(),
            vec![Method::Get, Method::Update, Method::List]
        );
        let payload = api.calls()[1].payload.clone().unwrap();
        assert_eq!(payload.department, "Research");
        assert_eq!(payload.user_name, "testuser1");
    }

    #[test]
    fn update_of_missing_user_stops_after_get() {
        let api = MockClient::empty();
        let err = handle_update(&api, 5, &FieldArgs::default(), OutputFormat::Json).unwrap_err();
        assert!(format!("{:#}", err).starts_with("Failed to fetch user 5"));
        assert_eq!(api.methods(), vec![Method::Get]);
    }

    #[test]
    fn delete_with_yes_refreshes_list() {
        let api = seeded();
        handle_delete(&api, 100, true, OutputFormat::Json).unwrap();
        assert_eq!(api.methods(), vec![Method::Delete, Method::List]);
        assert!(api.users().is_empty());
    }

    #[test]
    fn failed_list_is_an_error() {
        let api = MockClient::empty();
        api.fail_next(Method::List, 500, "db down");
        let err = handle_list(&api, OutputFormat::Json).unwrap_err();
        assert_eq!(format!("{:#}", err), "Failed to list users: db down");
    }
}
