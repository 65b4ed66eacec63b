// src/api/handlers/ws.rs
use actix::{Actor, Addr, AsyncContext, Handler, Message, StreamHandler};
use actix_web::{Error, HttpRequest, HttpResponse, web};
use actix_web_actors::ws;
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Per-row progress frame pushed to connected clients during a batch run.
#[derive(Message, Clone, Serialize)]
#[rtype(result = "()")]
pub struct GradeProgress {
    pub batch_id: String,
    pub completed: usize,
    pub total: usize,
    pub fraction: f64,
}

impl GradeProgress {
    pub fn new(batch_id: String, completed: usize, total: usize) -> Self {
        let fraction = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64
        };
        Self {
            batch_id,
            completed,
            total,
            fraction,
        }
    }
}

/// Fan-out point for progress frames. Broadcasting is synchronous so the
/// batch runner's progress callback can drive it directly.
#[derive(Clone)]
pub struct WsBroker {
    clients: Arc<RwLock<Vec<Addr<WsConnection>>>>,
}

impl WsBroker {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn register(&self, addr: Addr<WsConnection>) {
        if let Ok(mut clients) = self.clients.write() {
            clients.push(addr);
        }
    }

    pub fn unregister(&self, addr: &Addr<WsConnection>) {
        if let Ok(mut clients) = self.clients.write() {
            clients.retain(|c| c != addr);
        }
    }

    pub fn broadcast(&self, msg: GradeProgress) {
        if let Ok(clients) = self.clients.read() {
            for client in clients.iter() {
                client.do_send(msg.clone());
            }
        }
    }
}

impl Default for WsBroker {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WsConnection {
    broker: WsBroker,
}

impl WsConnection {
    pub fn new(broker: WsBroker) -> Self {
        Self { broker }
    }
}

impl Actor for WsConnection {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.broker.register(ctx.address());
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        self.broker.unregister(&ctx.address());
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsConnection {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Text(text)) => ctx.text(text),
            Ok(ws::Message::Close(reason)) => ctx.close(reason),
            _ => (),
        }
    }
}

impl Handler<GradeProgress> for WsConnection {
    type Result = ();

    fn handle(&mut self, msg: GradeProgress, ctx: &mut Self::Context) {
        if let Ok(json) = serde_json::to_string(&msg) {
            ctx.text(json);
        }
    }
}

pub async fn ws_handler(
    req: HttpRequest,
    stream: web::Payload,
    broker: web::Data<WsBroker>,
) -> Result<HttpResponse, Error> {
    let conn = WsConnection::new(broker.get_ref().clone());
    ws::start(conn, &req, stream)
}
