use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use sea_orm::{ConnectionTrait, EntityTrait, TransactionTrait};
use serde::Deserialize;
use serde_valid::Validate;

use super::{csrf::CsrfTokens, html, Error};
use crate::{
    catalog::{
        self,
        views::{ArtistCreate, ArtistUpdate},
    },
    AppState,
};

const FORM_INTENTION: &str = "artist";
const INDEX: &str = "/artist/";
const INVALID_TOKEN: &str = "The CSRF token is invalid. Please try to resubmit the form.";

#[derive(Debug, Deserialize)]
pub struct ArtistForm {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "_token")]
    token: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default, rename = "_token")]
    token: String,
}

fn delete_intention(id: i32) -> String {
    format!("delete{}", id)
}

async fn find<C>(db: &C, raw_id: &str) -> Result<entity::Artist, Error>
where
    C: ConnectionTrait,
{
    let id = raw_id.parse::<i32>().map_err(|_| Error::NotFound)?;
    catalog::find_by_id::<entity::ArtistEntity, _>(db, id)
        .await?
        .ok_or(Error::NotFound)
}

fn form(csrf: &CsrfTokens, action: &str, name: &str, submit: &str, errors: &[String]) -> String {
    format!(
        "{}<form method=\"post\" action=\"{}\">\n<label for=\"artist_name\">Name</label>\n<input type=\"text\" id=\"artist_name\" name=\"name\" maxlength=\"100\" value=\"{}\">\n<input type=\"hidden\" name=\"_token\" value=\"{}\">\n<button class=\"btn\">{}</button>\n</form>",
        html::errors(errors),
        html::escape(action),
        html::escape(name),
        csrf.token(FORM_INTENTION),
        submit
    )
}

fn new_page(csrf: &CsrfTokens, name: &str, errors: &[String]) -> Html<String> {
    html::page(
        "New Artist",
        &format!(
            "<h1>Create new Artist</h1>\n{}\n<a href=\"{}\">back to list</a>",
            form(csrf, "/artist/new", name, "Save", errors),
            INDEX
        ),
    )
}

fn edit_page(csrf: &CsrfTokens, artist: &entity::Artist, name: &str, errors: &[String]) -> Html<String> {
    html::page(
        "Edit Artist",
        &format!(
            "<h1>Edit Artist</h1>\n{}\n<a href=\"{}\">back to list</a>\n{}",
            form(
                csrf,
                &format!("/artist/{}/edit", artist.id),
                name,
                "Update",
                errors
            ),
            INDEX,
            delete_form(csrf, artist.id)
        ),
    )
}

fn delete_form(csrf: &CsrfTokens, id: i32) -> String {
    format!(
        "<form method=\"post\" action=\"/artist/{}\" onsubmit=\"return confirm('Are you sure you want to delete this item?');\">\n<input type=\"hidden\" name=\"_token\" value=\"{}\">\n<button class=\"btn\">Delete</button>\n</form>",
        id,
        csrf.token(&delete_intention(id))
    )
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, Error> {
    let artists = catalog::find_all::<entity::ArtistEntity>()
        .all(&state.db)
        .await?;
    let rows = if artists.is_empty() {
        "<tr><td colspan=\"3\">no records found</td></tr>".to_string()
    } else {
        artists
            .iter()
            .map(|a| {
                format!(
                    "<tr><td>{id}</td><td>{name}</td><td><a href=\"/artist/{id}\">show</a> <a href=\"/artist/{id}/edit\">edit</a></td></tr>",
                    id = a.id,
                    name = html::escape(&a.name)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(html::page(
        "Artist index",
        &format!(
            "<h1>Artist index</h1>\n<table class=\"table\">\n<thead><tr><th>Id</th><th>Name</th><th>actions</th></tr></thead>\n<tbody>\n{}\n</tbody>\n</table>\n<a href=\"/artist/new\">Create new</a>",
            rows
        ),
    ))
}

pub async fn new(State(state): State<AppState>) -> Html<String> {
    new_page(&state.csrf, "", &[])
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ArtistForm>,
) -> Result<Response, Error> {
    if !state.csrf.is_valid(FORM_INTENTION, &form.token) {
        let errors = [INVALID_TOKEN.to_string()];
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            new_page(&state.csrf, &form.name, &errors),
        )
            .into_response());
    }
    let tx = state.db.begin().await?;
    let payload = ArtistCreate {
        name: form.name.to_owned(),
    };
    match catalog::create::<entity::ArtistEntity, _>(&tx, payload).await {
        Ok(_) => {
            tx.commit().await?;
            Ok(Redirect::to(INDEX).into_response())
        }
        Err(catalog::Error::DbErr(e)) => Err(e.into()),
        Err(e) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            new_page(&state.csrf, &form.name, &e.messages()),
        )
            .into_response()),
    }
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, Error> {
    let artist = find(&state.db, &id).await?;
    Ok(html::page(
        "Artist",
        &format!(
            "<h1>Artist</h1>\n<table class=\"table\">\n<tbody>\n<tr><th>Id</th><td>{id}</td></tr>\n<tr><th>Name</th><td>{name}</td></tr>\n</tbody>\n</table>\n<a href=\"{index}\">back to list</a>\n<a href=\"/artist/{id}/edit\">edit</a>\n{delete}",
            id = artist.id,
            name = html::escape(&artist.name),
            index = INDEX,
            delete = delete_form(&state.csrf, artist.id)
        ),
    ))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, Error> {
    let artist = find(&state.db, &id).await?;
    Ok(edit_page(&state.csrf, &artist, &artist.name, &[]))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ArtistForm>,
) -> Result<Response, Error> {
    let tx = state.db.begin().await?;
    let artist = find(&tx, &id).await?;
    if !state.csrf.is_valid(FORM_INTENTION, &form.token) {
        let errors = [INVALID_TOKEN.to_string()];
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            edit_page(&state.csrf, &artist, &form.name, &errors),
        )
            .into_response());
    }
    // The form always carries the whole artist, so it is held to the
    // creation rules.
    let checked = ArtistCreate {
        name: form.name.to_owned(),
    };
    let result = match checked.validate() {
        Ok(()) => {
            let payload = ArtistUpdate {
                name: Some(checked.name),
            };
            catalog::update::<entity::ArtistEntity, _>(&tx, artist.clone(), payload).await
        }
        Err(errors) => Err(errors.into()),
    };
    match result {
        Ok(_) => {
            tx.commit().await?;
            Ok(Redirect::to(INDEX).into_response())
        }
        Err(catalog::Error::DbErr(e)) => Err(e.into()),
        Err(e) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            edit_page(&state.csrf, &artist, &form.name, &e.messages()),
        )
            .into_response()),
    }
}

/// A token mismatch silently skips the deletion.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, Error> {
    let tx = state.db.begin().await?;
    let artist = find(&tx, &id).await?;
    if state
        .csrf
        .is_valid(&delete_intention(artist.id), &form.token)
    {
        catalog::delete::<entity::ArtistEntity, _>(&tx, artist).await?;
        tx.commit().await?;
    } else {
        tracing::debug!(artist = artist.id, "Ignoring delete with an invalid CSRF token");
    }
    Ok(Redirect::to(INDEX))
}
