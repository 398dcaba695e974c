use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use common::{
    api::{self, AnalyzePassword, CalculateChecksum, CheckBreaches, Decrypt, Encrypt, EncryptionAlgorithms, Form, HashAlgorithms, Method, VerifyChecksum},
    consts::API_PREFIX,
};
use tracing::{error, info};
use warp::{
    filters::BoxedFilter,
    http::{header::CONTENT_TYPE, StatusCode},
    reply::Response,
    Filter, Rejection, Reply,
};

use super::form::{form, MalformedForm};
use crate::{
    request_dispatcher::{self, Handler, Req},
    state::State,
};

pub async fn run(state: State) -> eyre::Result<()> {
    let addr = state.config.listen_addr()?;
    let state = Arc::new(state);

    let (addr, server) = warp::serve(routes(state)).try_bind_ephemeral(addr)?;
    info!(%addr, "listening");
    server.await;

    Ok(())
}

pub fn routes(state: Arc<State>) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let limit = state.config.max_upload_bytes;

    endpoint::<CalculateChecksum>(state.clone(), limit)
        .or(endpoint::<VerifyChecksum>(state.clone(), limit))
        .unify()
        .or(endpoint::<AnalyzePassword>(state.clone(), limit))
        .unify()
        .or(endpoint::<Encrypt>(state.clone(), limit))
        .unify()
        .or(endpoint::<Decrypt>(state.clone(), limit))
        .unify()
        .or(endpoint::<CheckBreaches>(state.clone(), limit))
        .unify()
        .or(endpoint::<HashAlgorithms>(state.clone(), limit))
        .unify()
        .or(endpoint::<EncryptionAlgorithms>(state, limit))
        .unify()
        .with(warp::cors().allow_any_origin().allow_methods(vec!["GET", "POST"]))
        .recover(handle_rejection)
}

fn endpoint<E: Handler>(state: Arc<State>, limit: u64) -> BoxedFilter<(Response,)> {
    let input = match E::METHOD {
        Method::Get => warp::get().map(Form::new).boxed(),
        Method::Post => warp::post().and(form(limit)).boxed(),
    };

    warp::path(API_PREFIX)
        .and(warp::path(E::PATH))
        .and(warp::path::end())
        .and(input)
        .and(warp::addr::remote())
        .and_then(move |form, addr| call::<E>(state.clone(), form, addr))
        .boxed()
}

async fn call<E: Handler>(state: Arc<State>, form: Form, addr: Option<SocketAddr>) -> Result<Response, Rejection> {
    let resp = match request_dispatcher::call::<E>(&state, &Req { addr }, form).await {
        Ok(resp) => resp,
        Err(e) => {
            error!("{:#}", e);
            return Ok(StatusCode::INTERNAL_SERVER_ERROR.into_response());
        }
    };

    let status = StatusCode::from_u16(resp.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Ok(warp::reply::with_status(warp::reply::with_header(resp.body, CONTENT_TYPE, "application/json"), status).into_response())
}

async fn handle_rejection(rejection: Rejection) -> Result<Response, Infallible> {
    let (status, error) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_owned())
    } else if let Some(MalformedForm(reason)) = rejection.find::<MalformedForm>() {
        (StatusCode::BAD_REQUEST, format!("Malformed form: {}", reason))
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Upload too large".to_owned())
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_owned())
    } else {
        (StatusCode::BAD_REQUEST, format!("{:?}", rejection))
    };

    let body = api::ErrorBody { error, message: None };
    Ok(warp::reply::with_status(warp::reply::json(&body), status).into_response())
}
