//! Client behavior against an in-process fake backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use tienda_client::{ApiClient, ApiError, GENERIC_MESSAGE};
use tienda_core::listing::ListQuery;
use tienda_core::models::{
    Cliente, EstadoAutorizacion, LoginRequest, MetodoPago, NuevaVenta, NuevaVentaItem, Producto,
    RangoFechas, TipoReporte,
};

const TOKEN: &str = "token-de-prueba";

async fn spawn(api: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().nest("/api", api);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Token inválido"})));
    }
    (
        StatusCode::OK,
        Json(json!({"id": 1, "username": "admin", "nombre": "Administrador", "rol": "admin"})),
    )
}

fn venta() -> NuevaVenta {
    NuevaVenta {
        referencia: "ref-1".into(),
        cliente_id: None,
        items: vec![NuevaVentaItem {
            producto_id: 1,
            cantidad: Decimal::from(3),
            precio_unitario: Decimal::new(1000, 2),
        }],
        descuento_adicional: Decimal::ZERO,
        porcentaje_descuento: Decimal::ZERO,
        costo_envio: Decimal::ZERO,
        total: Decimal::new(3000, 2),
        metodo_pago: MetodoPago::Efectivo,
        monto_recibido: None,
        autorizacion_id: None,
        envio: None,
    }
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let base = spawn(Router::new().route("/auth/me", get(me))).await;

    let usuario = ApiClient::new(&base)
        .with_token(TOKEN)
        .current_user()
        .await
        .unwrap();
    assert_eq!(usuario.username, "admin");
}

#[tokio::test]
async fn test_401_maps_to_unauthorized() {
    let base = spawn(Router::new().route("/auth/me", get(me))).await;

    let err = ApiClient::new(&base).current_user().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);

    let err = ApiClient::new(&base)
        .with_token("otro")
        .current_user()
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_login_posts_credentials() {
    async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["username"] == "cajero" && body["password"] == "secreto" {
            (
                StatusCode::OK,
                Json(json!({
                    "token": TOKEN,
                    "usuario": {"id": 2, "username": "cajero", "nombre": "Caja", "rol": "cajero"}
                })),
            )
        } else {
            (StatusCode::BAD_REQUEST, Json(json!({"mensaje": "Credenciales incorrectas"})))
        }
    }
    let base = spawn(Router::new().route("/auth/login", post(login))).await;
    let client = ApiClient::new(&base);

    let ok = client
        .login(&LoginRequest {
            username: "cajero".into(),
            password: "secreto".into(),
        })
        .await
        .unwrap();
    assert_eq!(ok.token, TOKEN);

    let err = client
        .login(&LoginRequest {
            username: "cajero".into(),
            password: "mal".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Credenciales incorrectas");
}

#[tokio::test]
async fn test_server_message_is_extracted() {
    async fn rechazar() -> (StatusCode, Json<Value>) {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"mensaje": "Stock insuficiente para Arroz"})),
        )
    }
    async fn caido() -> (StatusCode, &'static str) {
        (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
    }
    let base = spawn(
        Router::new()
            .route("/ventas", post(rechazar))
            .route("/ventas/:id/cancelar", post(caido)),
    )
    .await;
    let client = ApiClient::new(&base).with_token(TOKEN);

    let err = client.create_sale(&venta()).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 422,
            message: "Stock insuficiente para Arroz".into()
        }
    );

    let err = client.cancel_sale(5).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.user_message(), GENERIC_MESSAGE);
}

#[tokio::test]
async fn test_sale_payload_reaches_server() {
    async fn registrar(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({
            "id": 10,
            "folio": "V-0010",
            "total": body["total"],
            "metodo_pago": body["metodo_pago"],
        }))
    }
    let base = spawn(Router::new().route("/ventas", post(registrar))).await;

    let creada = ApiClient::new(&base)
        .with_token(TOKEN)
        .create_sale(&venta())
        .await
        .unwrap();
    assert_eq!(creada.folio.as_deref(), Some("V-0010"));
    assert_eq!(creada.total, Decimal::from(30));
}

#[tokio::test]
async fn test_bare_array_list_is_filtered_and_paged_locally() {
    async fn productos() -> Json<Value> {
        let rows: Vec<Value> = (1..=25)
            .map(|i| json!({"id": i, "nombre": format!("Producto {}", i), "precio_venta": "1.00"}))
            .chain(std::iter::once(json!({"id": 99, "nombre": "Café molido"})))
            .collect();
        Json(Value::Array(rows))
    }
    let base = spawn(Router::new().route("/productos", get(productos))).await;
    let client = ApiClient::new(&base).with_token(TOKEN);

    let page = client.list_page::<Producto>(&ListQuery::page(3)).await.unwrap();
    assert_eq!(page.total, 26);
    assert_eq!(page.page, 3);
    assert_eq!(page.items.len(), 6);
    assert!(!page.has_next());

    let found = client
        .list_page::<Producto>(&ListQuery::page(1).with_search("cafe"))
        .await
        .unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].id, Some(99));
}

#[tokio::test]
async fn test_paged_envelope_is_taken_as_is() {
    async fn clientes(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let q = params.get("q").cloned().unwrap_or_default();
        Json(json!({
            "data": [{"id": 7, "nombre": format!("Resultado {}", q)}],
            "total": 31,
            "page": page,
            "per_page": 10
        }))
    }
    let base = spawn(Router::new().route("/clientes", get(clientes))).await;

    let page = ApiClient::new(&base)
        .with_token(TOKEN)
        .list_page::<Cliente>(&ListQuery::page(2).with_search("ana"))
        .await
        .unwrap();
    assert_eq!(page.total, 31);
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages(), 4);
    assert_eq!(page.items[0].nombre, "Resultado ana");
}

#[tokio::test]
async fn test_backup_download_returns_raw_bytes() {
    async fn descargar(Path(nombre): Path<String>) -> (StatusCode, Vec<u8>) {
        if nombre == "respaldo 2024.sql" {
            (StatusCode::OK, vec![0x00, 0xff, 0x10, 0x42])
        } else {
            (StatusCode::NOT_FOUND, Vec::new())
        }
    }
    let base = spawn(Router::new().route("/backup/descargar/:nombre", get(descargar))).await;
    let client = ApiClient::new(&base).with_token(TOKEN);

    let bytes = client.download_backup("respaldo 2024.sql").await.unwrap();
    assert_eq!(bytes, vec![0x00, 0xff, 0x10, 0x42]);

    let err = client.download_backup("otro.sql").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_authorization_polling_stops_when_resolved() {
    let polls = Arc::new(AtomicUsize::new(0));

    async fn consultar(State(polls): State<Arc<AtomicUsize>>, Path(id): Path<i64>) -> Json<Value> {
        let n = polls.fetch_add(1, Ordering::SeqCst) + 1;
        let estado = if n < 3 { "pendiente" } else { "aprobado" };
        Json(json!({"id": id, "porcentaje": "20", "estado": estado}))
    }
    let base = spawn(
        Router::new()
            .route("/autorizaciones/:id", get(consultar))
            .with_state(polls.clone()),
    )
    .await;

    let mut waits = 0;
    let solicitud = ApiClient::new(&base)
        .with_token(TOKEN)
        .poll_authorization(12, |_| {
            waits += 1;
            async {}
        })
        .await
        .unwrap();

    assert_eq!(solicitud.estado, EstadoAutorizacion::Aprobado);
    assert_eq!(polls.load(Ordering::SeqCst), 3);
    assert_eq!(waits, 3);
}

#[tokio::test]
async fn test_authorization_polling_gives_up_after_repeated_failures() {
    async fn roto() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
    let base = spawn(Router::new().route("/autorizaciones/:id", get(roto))).await;

    let mut waits = 0;
    let err = ApiClient::new(&base)
        .with_token(TOKEN)
        .poll_authorization(1, |_| {
            waits += 1;
            async {}
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(waits, tienda_client::MAX_POLL_FAILURES as usize);
}

#[tokio::test]
async fn test_report_sends_range() {
    async fn ventas(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        Json(json!({
            "data": [
                {"fecha": params.get("desde"), "total": "100.00"},
                {"fecha": params.get("hasta"), "total": "50.00"}
            ]
        }))
    }
    let base = spawn(Router::new().route("/reportes/ventas", get(ventas))).await;

    let rango = RangoFechas::new(
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
    )
    .unwrap();
    let rows = ApiClient::new(&base)
        .with_token(TOKEN)
        .report(TipoReporte::Ventas, &rango)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["fecha"], "2024-05-01");
    assert_eq!(rows[1]["fecha"], "2024-05-31");
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = ApiClient::new(format!("http://{}/api", addr))
        .dashboard()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message(), GENERIC_MESSAGE);
}

#[tokio::test]
async fn test_short_search_is_not_sent() {
    let base = spawn(Router::new()).await;
    let results = ApiClient::new(&base).search(" a ").await.unwrap();
    assert!(results.is_empty());
}
