use std::{fmt, net::SocketAddr};

use async_trait::async_trait;
use common::api::{self, Endpoint, Form};
use eyre::WrapErr;
use futures_util::TryFutureExt;
use tracing::{error, info, info_span, Instrument};

use crate::state::State;

/// Server side of an [`Endpoint`].
#[async_trait]
pub trait Handler: Endpoint {
    async fn handle(self, state: &State) -> api::Result<Self::Ret>;

    /// Some endpoints answer a missing input with a 200 and an error-shaped body.
    fn fallback(_e: &api::Error) -> Option<serde_json::Value> {
        None
    }
}

pub fn log_error(e: &api::Error) {
    match e {
        api::Error::ServerSideError(_) | api::Error::ClientSideError(_) | api::Error::Remote { .. } => error!("{0:#}\n{0:?}", e),
        _ => info!("{}", e),
    }
}

pub fn status_of(e: &api::Error) -> u16 {
    if e.is_business() { 400 } else { 500 }
}

pub struct Req {
    pub addr: Option<SocketAddr>,
}

impl fmt::Display for Req {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.addr {
            Some(addr) => write!(f, "{}", addr),
            None => f.write_str("unknown"),
        }
    }
}

/// A JSON reply, ready to be put on the wire by the http layer.
#[derive(Debug)]
pub struct Resp {
    pub status: u16,
    pub body: Vec<u8>,
}

pub async fn call<E: Handler>(state: &State, req: &Req, form: Form) -> eyre::Result<Resp> {
    let res = async {
        async { E::from_form(form)?.handle(state).await }
            .inspect_err(log_error)
            .instrument(info_span!("endpoint", name = E::DISPLAY_NAME))
            .await
    }
    .instrument(info_span!("api", peer = %req))
    .await;

    let (status, body) = match res {
        Ok(ret) => (200, serde_json::to_vec(&ret)),
        Err(e) => match E::fallback(&e) {
            Some(body) => (200, serde_json::to_vec(&body)),
            None => (status_of(&e), serde_json::to_vec(&e.to_body())),
        },
    };

    Ok(Resp {
        status,
        body: body.wrap_err("Serialization error")?,
    })
}
