use super::{DispatchPhase, Dispatcher};
use crate::coerce::DeclaredType;
use crate::error::{DispatchError, RegistrationError};
use crate::runtime_config::RuntimeConfig;
use crate::server::{HttpRequest, HttpResponse, ResponseAction};
use crate::spec::{ParameterSpec, Route};
use crate::view::{MiniJinjaRenderer, ModelAndView, TemplateRenderer, View, ViewResolver, ViewResolvers};
use anyhow::anyhow;
use http::Method;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CountingRenderer {
    calls: AtomicUsize,
}

impl TemplateRenderer for CountingRenderer {
    fn render(&self, location: &str, _model: &crate::view::Model) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("rendered {location}"))
    }
}

fn inline_renderer() -> Arc<dyn TemplateRenderer> {
    Arc::new(MiniJinjaRenderer::from_sources([
        ("greeting.html", "Hello, {{ name }}!"),
        ("user.html", "User {{ id }}"),
    ]))
}

fn dispatch(dispatcher: &Dispatcher, method: Method, target: &str) -> (Result<(), DispatchError>, HttpResponse) {
    let request = HttpRequest::new(method, target);
    let mut response = HttpResponse::new();
    let result = dispatcher.dispatch(&request, &mut response);
    (result, response)
}

#[test]
fn test_forward_renders_template_with_model() {
    let dispatcher = Dispatcher::builder()
        .renderer(inline_renderer())
        .route(
            "greet",
            Route::get("/greet/{name}"),
            vec![ParameterSpec::path_variable("name", DeclaredType::String)],
            |args| {
                let name: String = args.get("name")?;
                Ok(ModelAndView::new("greeting").add("name", name))
            },
        )
        .build()
        .unwrap();

    let (result, response) = dispatch(&dispatcher, Method::GET, "/greet/world");
    assert!(result.is_ok());
    assert_eq!(response.status(), 200);
    match response.action() {
        Some(ResponseAction::Forward {
            location,
            model,
            body,
        }) => {
            assert_eq!(location, "greeting.html");
            assert_eq!(model.get("name"), Some(&json!("world")));
            assert_eq!(body, "Hello, world!");
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

#[test]
fn test_redirect_never_renders() {
    let renderer = Arc::new(CountingRenderer {
        calls: AtomicUsize::new(0),
    });
    let dispatcher = Dispatcher::builder()
        .renderer(Arc::clone(&renderer) as Arc<dyn TemplateRenderer>)
        .route("login", Route::post("/login"), vec![], |_args| {
            Ok("redirect:/dashboard")
        })
        .build()
        .unwrap();

    let (result, response) = dispatch(&dispatcher, Method::POST, "/login");
    assert!(result.is_ok());
    assert_eq!(response.status(), 302);
    assert_eq!(response.header("Location"), Some("/dashboard"));
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unknown_route_commits_not_found() {
    let dispatcher = Dispatcher::builder()
        .renderer(inline_renderer())
        .build()
        .unwrap();
    let (result, response) = dispatch(&dispatcher, Method::GET, "/missing");
    assert!(matches!(result, Err(DispatchError::RouteNotFound { .. })));
    assert_eq!(response.action(), Some(&ResponseAction::NotFound));
    assert_eq!(response.status(), 404);
}

#[test]
fn test_coercion_failure_is_server_error_and_skips_handler() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&invoked);
    let dispatcher = Dispatcher::builder()
        .renderer(inline_renderer())
        .route(
            "get_user",
            Route::get("/users/{id}"),
            vec![ParameterSpec::path_variable("id", DeclaredType::Int)],
            move |_args| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok("user")
            },
        )
        .build()
        .unwrap();

    let (result, response) = dispatch(&dispatcher, Method::GET, "/users/abc");
    match result {
        Err(DispatchError::CoercionFailed { raw, target }) => {
            assert_eq!(raw, "abc");
            assert_eq!(target, DeclaredType::Int);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(response.status(), 500);
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unclaimed_view_name_is_not_resolved() {
    let dispatcher = Dispatcher::builder()
        .renderer(inline_renderer())
        .route("ftp", Route::get("/ftp"), vec![], |_args| Ok("ftp:files"))
        .build()
        .unwrap();
    let (result, response) = dispatch(&dispatcher, Method::GET, "/ftp");
    assert!(matches!(result, Err(DispatchError::ViewNotResolved { view_name }) if view_name == "ftp:files"));
    assert_eq!(response.status(), 500);
}

#[test]
fn test_handler_error_is_server_error() {
    let dispatcher = Dispatcher::builder()
        .renderer(inline_renderer())
        .route("boom", Route::get("/boom"), vec![], |_args| -> anyhow::Result<&'static str> {
            Err(anyhow!("database unavailable"))
        })
        .build()
        .unwrap();
    let (result, response) = dispatch(&dispatcher, Method::GET, "/boom");
    assert!(matches!(result, Err(DispatchError::Handler(_))));
    assert_eq!(response.action(), Some(&ResponseAction::ServerError));
}

#[test]
fn test_handler_panic_is_contained() {
    let dispatcher = Dispatcher::builder()
        .renderer(inline_renderer())
        .route("panics", Route::get("/panics"), vec![], |_args| -> anyhow::Result<&'static str> {
            panic!("handler bug")
        })
        .build()
        .unwrap();
    let (result, response) = dispatch(&dispatcher, Method::GET, "/panics");
    match result {
        Err(DispatchError::Handler(err)) => assert!(err.to_string().contains("handler bug")),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(response.status(), 500);
}

#[test]
fn test_render_failure_is_server_error() {
    let dispatcher = Dispatcher::builder()
        .renderer(inline_renderer())
        .route("missing", Route::get("/missing-template"), vec![], |_args| Ok("nowhere"))
        .build()
        .unwrap();
    let (result, response) = dispatch(&dispatcher, Method::GET, "/missing-template");
    assert!(matches!(result, Err(DispatchError::Render(_))));
    assert_eq!(response.action(), Some(&ResponseAction::ServerError));
}

#[test]
fn test_concrete_view_skips_resolution() {
    let dispatcher = Dispatcher::builder()
        .view_resolvers(ViewResolvers::new(vec![]))
        .route("status", Route::get("/status"), vec![], |_args| {
            Ok(ModelAndView::with_view(View::json()).add("ok", true))
        })
        .build()
        .unwrap();
    let (result, response) = dispatch(&dispatcher, Method::GET, "/status");
    assert!(result.is_ok());
    assert_eq!(
        response.action(),
        Some(&ResponseAction::Json {
            body: json!({"ok": true})
        })
    );
}

#[test]
fn test_config_prefix_and_suffix_shape_location() {
    let config = RuntimeConfig {
        view_prefix: "pages/".to_string(),
        view_suffix: ".jinja".to_string(),
        redirect_prefix: "goto:".to_string(),
        ..RuntimeConfig::default()
    };
    let dispatcher = Dispatcher::builder()
        .config(config)
        .renderer(Arc::new(MiniJinjaRenderer::from_sources([(
            "pages/home.jinja",
            "home",
        )])))
        .route("home", Route::get("/"), vec![], |_args| Ok("home"))
        .route("away", Route::get("/away"), vec![], |_args| Ok("goto:/elsewhere"))
        .build()
        .unwrap();

    let (_, home) = dispatch(&dispatcher, Method::GET, "/");
    assert!(matches!(home.action(), Some(ResponseAction::Forward { location, .. }) if location == "pages/home.jinja"));

    let (_, away) = dispatch(&dispatcher, Method::GET, "/away");
    assert_eq!(away.header("location"), Some("/elsewhere"));
}

#[test]
fn test_legacy_controller_after_annotated_routes() {
    let dispatcher = Dispatcher::builder()
        .renderer(inline_renderer())
        .route("annotated", Route::get("/both"), vec![], |_args| Ok("redirect:/annotated"))
        .legacy("/both", |_req, _resp| Ok("redirect:/legacy".to_string()))
        .legacy("/old", |req, _resp| Ok(format!("redirect:/old-{}", req.method())))
        .build()
        .unwrap();

    let (_, both) = dispatch(&dispatcher, Method::GET, "/both");
    assert_eq!(both.header("location"), Some("/annotated"));

    // Annotated route is GET-only, so POST falls through to the legacy mapping
    let (_, both_post) = dispatch(&dispatcher, Method::POST, "/both");
    assert_eq!(both_post.header("location"), Some("/legacy"));

    let (_, old) = dispatch(&dispatcher, Method::DELETE, "/old");
    assert_eq!(old.header("location"), Some("/old-DELETE"));
}

#[test]
fn test_build_rejects_bad_registrations() {
    let err = Dispatcher::builder()
        .route("bad", Route::get("/users/{}"), vec![], |_args| Ok("x"))
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistrationError::InvalidVariable { .. }));

    let err = Dispatcher::builder()
        .legacy("/items/{id}", |_req, _resp| Ok("x".to_string()))
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistrationError::TemplatedLegacyPath { .. }));
}

#[test]
fn test_uncaptured_path_variable_fails_at_request_time() {
    let dispatcher = Dispatcher::builder()
        .renderer(inline_renderer())
        .route(
            "typo",
            Route::get("/users/{id}"),
            vec![ParameterSpec::path_variable("user_id", DeclaredType::Long)],
            |_args| Ok("user"),
        )
        .build()
        .unwrap();
    let (result, _) = dispatch(&dispatcher, Method::GET, "/users/1");
    assert!(matches!(result, Err(DispatchError::MissingPathVariable { name }) if name == "user_id"));
}

#[test]
fn test_custom_view_resolver_chain() {
    let dispatcher = Dispatcher::builder()
        .view_resolvers(ViewResolvers::new(vec![ViewResolver::Redirect {
            prefix: "to:".to_string(),
        }]))
        .route("r", Route::get("/r"), vec![], |_args| Ok("to:/x"))
        .route("t", Route::get("/t"), vec![], |_args| Ok("template"))
        .build()
        .unwrap();
    let (_, r) = dispatch(&dispatcher, Method::GET, "/r");
    assert_eq!(r.status(), 302);
    let (result, _) = dispatch(&dispatcher, Method::GET, "/t");
    assert!(matches!(result, Err(DispatchError::ViewNotResolved { .. })));
}

#[test]
fn test_dispatcher_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Dispatcher>();

    let dispatcher = Arc::new(
        Dispatcher::builder()
            .renderer(inline_renderer())
            .route(
                "get_user",
                Route::get("/users/{id}"),
                vec![ParameterSpec::path_variable("id", DeclaredType::Long)],
                |args| {
                    let id: i64 = args.get("id")?;
                    Ok(ModelAndView::new("user").add("id", id))
                },
            )
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            std::thread::spawn(move || {
                let (result, response) = dispatch(&dispatcher, Method::GET, &format!("/users/{i}"));
                assert!(result.is_ok());
                match response.action() {
                    Some(ResponseAction::Forward { body, .. }) => body.clone(),
                    other => panic!("unexpected action: {other:?}"),
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("User {i}"));
    }
}

#[test]
fn test_phase_names() {
    assert_eq!(DispatchPhase::Routing.to_string(), "routing");
    assert_eq!(DispatchPhase::ViewResolving.to_string(), "view_resolving");
}

#[test]
fn test_extension_method_never_reaches_legacy_controller() {
    let dispatcher = Dispatcher::builder()
        .renderer(inline_renderer())
        .legacy("/", |_req, _resp| Ok("redirect:/x".to_string()))
        .build()
        .unwrap();

    let request = HttpRequest::parse("frobnicate", "/").unwrap();
    let mut response = HttpResponse::new();
    let result = dispatcher.dispatch(&request, &mut response);
    assert!(matches!(result, Err(DispatchError::RouteNotFound { .. })));
    assert_eq!(response.status(), 404);
    assert_eq!(response.header("location"), None);
}

#[test]
fn test_error_response_drops_handler_headers() {
    let dispatcher = Dispatcher::builder()
        .renderer(inline_renderer())
        .route(
            "leaky",
            Route::get("/leaky"),
            vec![ParameterSpec::response("resp")],
            |args| -> anyhow::Result<&'static str> {
                if let Some(resp) = args.response() {
                    resp.set_header("location", "/secret");
                    resp.set_header("x-handled", "yes");
                }
                Err(anyhow!("backend unavailable"))
            },
        )
        .build()
        .unwrap();

    let request = HttpRequest::new(Method::GET, "/leaky");
    let mut response = HttpResponse::new();
    let result = dispatcher.dispatch(&request, &mut response);
    assert!(matches!(result, Err(DispatchError::Handler(_))));
    assert_eq!(response.action(), Some(&ResponseAction::ServerError));
    assert!(response.headers().is_empty());
}
