use anyhow::{Context, bail};
use serde_json::json;
use sherwood_core::application::ExtensionRuntime;
use sherwood_core::contexts::dispatch_json;
use sherwood_core::settings::{DisplaySettingsService, GridSettingsService};
use sherwood_model::{
    BookmarkId, DisplayToggle, GridSettings, InstallReason, NewBookmark,
    PaginationView,
};

use super::{
    BackgroundAction, BookmarksAction, Command, GridAction, SettingsAction,
    SizeAction,
};

/// Runs `command` and returns what should be printed on stdout.
pub async fn execute(
    command: Command,
    runtime: &ExtensionRuntime,
) -> anyhow::Result<String> {
    match command {
        Command::Install { update } => install(runtime, update).await,
        Command::Status => {
            Ok(dispatch_json(runtime.background.as_ref(), r#"{"action":"get-status"}"#)
                .await)
        }
        Command::Toggle => {
            let state = runtime.popup().toggle().await?;
            Ok(format!("extension is now {state}"))
        }
        Command::Bookmarks { action } => bookmarks(runtime, action).await,
        Command::Grid { action } => grid(runtime, action).await,
        Command::Settings { action } => settings(runtime, action).await,
        Command::Background {
            action: BackgroundAction::Set { image },
        } => {
            let mut page = runtime.new_tab_page();
            page.set_background_image(&image).await?;
            Ok("background image updated".to_string())
        }
        Command::Size {
            action: SizeAction::Set { px },
        } => {
            let mut page = runtime.new_tab_page();
            let size = page.set_icon_size(px).await?;
            Ok(format!("icon size set to {}", size.css_length()))
        }
        Command::Message { json } => {
            Ok(dispatch_json(runtime.background.as_ref(), &json).await)
        }
    }
}

async fn install(
    runtime: &ExtensionRuntime,
    update: bool,
) -> anyhow::Result<String> {
    let reason = if update {
        InstallReason::Update
    } else {
        InstallReason::Install
    };
    runtime.background.on_installed(reason).await?;

    let mut page = runtime.new_tab_page();
    let view = page.load().await?;
    let state = runtime.broker.query().await?;
    Ok(format!(
        "initialised ({reason:?}); extension is {state}; {} bookmark(s)",
        view.item_count
    ))
}

async fn bookmarks(
    runtime: &ExtensionRuntime,
    action: BookmarksAction,
) -> anyhow::Result<String> {
    let mut page = runtime.new_tab_page();
    page.load().await?;

    match action {
        BookmarksAction::List { page: index } => {
            render_page(&page.bookmarks().list(index))
        }
        BookmarksAction::Add { title, url } => {
            let added = page.add_bookmark(&NewBookmark::new(title, url)).await?;
            Ok(serde_json::to_string_pretty(&added)?)
        }
        BookmarksAction::Remove { id } => {
            let id = BookmarkId::new(id);
            if page.remove_bookmark(&id).await? {
                Ok(format!("removed {id}"))
            } else {
                Ok(format!("no bookmark with id {id}"))
            }
        }
        BookmarksAction::Open { id } => {
            let url = page.open_bookmark(&BookmarkId::new(id))?;
            Ok(url.to_string())
        }
    }
}

fn render_page(view: &PaginationView) -> anyhow::Result<String> {
    let body = json!({
        "page": view.current_page,
        "totalPages": view.total_pages,
        "capacity": view.capacity,
        "count": view.item_count,
        "items": view.items,
    });
    Ok(serde_json::to_string_pretty(&body)?)
}

async fn grid(
    runtime: &ExtensionRuntime,
    action: GridAction,
) -> anyhow::Result<String> {
    let mut service = GridSettingsService::new(runtime.store.clone());
    let current = service.load().await?;

    let grid = match action {
        GridAction::Show => current,
        GridAction::Set { columns, rows, gap } => {
            if columns.is_none() && rows.is_none() && gap.is_none() {
                bail!("grid set needs at least one of --columns, --rows, --gap");
            }
            service
                .update(GridSettings::clamped(
                    columns.unwrap_or(current.columns),
                    rows.unwrap_or(current.rows),
                    gap.unwrap_or(current.gap),
                ))
                .await?
        }
    };
    Ok(serde_json::to_string_pretty(&grid)?)
}

async fn settings(
    runtime: &ExtensionRuntime,
    action: SettingsAction,
) -> anyhow::Result<String> {
    let mut service = DisplaySettingsService::new(runtime.store.clone());
    let current = service.load().await?;

    let settings = match action {
        SettingsAction::Show => current,
        SettingsAction::Set { toggle, value } => {
            let toggle = DisplayToggle::parse(&toggle).with_context(|| {
                let known: Vec<&str> =
                    DisplayToggle::ALL.iter().map(|t| t.as_str()).collect();
                format!("unknown toggle `{toggle}`; expected one of {}", known.join(", "))
            })?;
            service.set_toggle(toggle, value).await?
        }
    };
    Ok(serde_json::to_string_pretty(&settings)?)
}
