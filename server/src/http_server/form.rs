use std::collections::HashMap;

use common::api::{Form, Upload};
use futures_util::TryStreamExt;
use tracing::debug;
use warp::{
    filters::BoxedFilter,
    multipart::{FormData, Part},
    reject::{self, Reject},
    Buf, Filter, Rejection,
};

#[derive(Debug)]
pub struct MalformedForm(pub String);
impl Reject for MalformedForm {}

fn malformed(e: impl std::fmt::Display) -> Rejection {
    reject::custom(MalformedForm(e.to_string()))
}

async fn read_part(part: Part) -> Result<Vec<u8>, Rejection> {
    part.stream()
        .try_fold(Vec::new(), |mut acc, mut buf| async move {
            let n = buf.remaining();
            acc.extend_from_slice(&buf.copy_to_bytes(n));
            Ok::<_, warp::Error>(acc)
        })
        .await
        .map_err(malformed)
}

async fn read_multipart(mut data: FormData) -> Result<Form, Rejection> {
    let mut form = Form::new();
    while let Some(part) = data.try_next().await.map_err(malformed)? {
        let name = part.name().to_owned();
        match part.filename().map(str::to_owned) {
            Some(filename) => {
                let bytes = read_part(part).await?;
                debug!(%name, %filename, size = bytes.len(), "file part");
                form.insert_file(name, Upload { filename, bytes });
            }
            None => {
                let bytes = read_part(part).await?;
                let value = String::from_utf8(bytes).map_err(malformed)?;
                form.insert_text(name, value);
            }
        }
    }
    Ok(form)
}

/// Extracts a [`Form`] from either a multipart or an urlencoded body.
pub fn form(limit: u64) -> BoxedFilter<(Form,)> {
    let multipart = warp::multipart::form()
        .max_length(limit)
        .and_then(read_multipart);

    let urlencoded = warp::body::content_length_limit(limit)
        .and(warp::body::form())
        .map(|fields: HashMap<String, String>| {
            fields.into_iter().fold(Form::new(), |mut form, (k, v)| {
                form.insert_text(k, v);
                form
            })
        });

    multipart.or(urlencoded).unify().boxed()
}
