use crate::catalog::Catalog;
use crate::http::{read_head, Request, Response};
use anyhow::Result;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

pub struct SuggestionServer {
    listener: TcpListener,
    catalog: Arc<Catalog>,
}

impl SuggestionServer {
    pub async fn bind(addr: &str, catalog: Catalog) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            catalog: Arc::new(catalog),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listener fails. One request per
    /// connection.
    pub async fn serve(self) -> Result<()> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            stream.set_nodelay(true)?;
            let catalog = self.catalog.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, &catalog).await {
                    tracing::warn!("connection from {} failed: {}", peer, e);
                }
            });
        }
    }
}

async fn handle_connection(mut stream: TcpStream, catalog: &Catalog) -> Result<()> {
    let Some(head) = read_head(&mut stream).await? else {
        return Ok(());
    };
    let response = match Request::parse(&head) {
        Ok(req) => {
            let response = route(&req, catalog);
            tracing::debug!("{} {} {:?} -> {}", req.method, req.path, req.query, response.status);
            response
        }
        Err(e) => {
            tracing::debug!("bad request: {}", e);
            Response::error(400, "bad request")
        }
    };
    stream.write_all(&response.to_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

pub fn route(req: &Request, catalog: &Catalog) -> Response {
    if !matches!(req.path.as_str(), "/suggestions" | "/countries") {
        return Response::error(404, "not found");
    }
    match req.method.as_str() {
        "GET" => {
            let suggestions = catalog.lookup(req.query.as_deref());
            Response::json(200, json!({ "suggestions": suggestions }))
        }
        "OPTIONS" => Response::empty(204),
        _ => Response::error(405, "method not allowed"),
    }
}
