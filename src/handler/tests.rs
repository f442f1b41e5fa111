use super::{Handler, HandlerDescriptor, HandlerExecution, HandlerOutput};
use crate::coerce::DeclaredType;
use crate::error::DispatchError;
use crate::resolver::{ArgumentResolvers, Arguments};
use crate::server::{HttpRequest, HttpResponse};
use crate::spec::{ParamVec, ParameterSpec, Route};
use crate::view::{ModelAndView, View, ViewRef};
use anyhow::anyhow;
use http::Method;
use serde_json::json;
use std::sync::Arc;

struct ShowUser;

impl Handler for ShowUser {
    fn handle(&self, args: &mut Arguments<'_>) -> anyhow::Result<HandlerOutput> {
        let id: i64 = args.get("id")?;
        Ok(ModelAndView::new("user/show").add("id", id).into())
    }
}

fn bound(descriptor: HandlerDescriptor, vars: &[(&str, &str)]) -> HandlerExecution {
    HandlerExecution::Annotated {
        descriptor: Arc::new(descriptor),
        path_variables: vars
            .iter()
            .map(|(k, v)| (Arc::from(*k), v.to_string()))
            .collect::<ParamVec>(),
    }
}

#[test]
fn test_struct_handler_receives_coerced_argument() {
    let exec = bound(
        HandlerDescriptor::new(
            "show_user",
            Route::get("/users/{id}"),
            vec![ParameterSpec::path_variable("id", DeclaredType::Long)],
            ShowUser,
        ),
        &[("id", "42")],
    );
    let req = HttpRequest::new(Method::GET, "/users/42");
    let mut resp = HttpResponse::new();

    let mav = exec
        .execute(&req, &mut resp, &ArgumentResolvers::default())
        .unwrap();
    assert_eq!(mav.view_name(), Some("user/show"));
    assert_eq!(mav.model().get("id"), Some(&json!(42)));
    assert_eq!(exec.name(), "show_user");
    assert_eq!(exec.path_variables().len(), 1);
}

#[test]
fn test_bare_string_becomes_view_name() {
    let exec = bound(
        HandlerDescriptor::from_fn("home", Route::get("/"), vec![], |_args| Ok("index")),
        &[],
    );
    let req = HttpRequest::new(Method::GET, "/");
    let mut resp = HttpResponse::new();

    let mav = exec
        .execute(&req, &mut resp, &ArgumentResolvers::default())
        .unwrap();
    assert_eq!(mav.view_name(), Some("index"));
    assert!(mav.model().is_empty());
}

#[test]
fn test_concrete_view_passes_through() {
    let exec = bound(
        HandlerDescriptor::from_fn("api", Route::get("/api"), vec![], |_args| {
            Ok(View::json())
        }),
        &[],
    );
    let req = HttpRequest::new(Method::GET, "/api");
    let mut resp = HttpResponse::new();

    let mav = exec
        .execute(&req, &mut resp, &ArgumentResolvers::default())
        .unwrap();
    assert!(matches!(mav.view(), ViewRef::View(View::Json(_))));
}

#[test]
fn test_arguments_follow_declaration_order() {
    let exec = bound(
        HandlerDescriptor::from_fn(
            "ordered",
            Route::get("/a/{x}"),
            vec![
                ParameterSpec::request_param("q", DeclaredType::String),
                ParameterSpec::path_variable("x", DeclaredType::Int),
            ],
            |args| {
                let order = args.names().collect::<Vec<_>>().join(",");
                let q: String = args.at(0)?;
                let x: i32 = args.at(1)?;
                Ok(ModelAndView::new("ordered")
                    .add("order", order)
                    .add("q", q)
                    .add("x", x))
            },
        ),
        &[("x", "5")],
    );
    let req = HttpRequest::new(Method::GET, "/a/5?q=hi");
    let mut resp = HttpResponse::new();

    let mav = exec
        .execute(&req, &mut resp, &ArgumentResolvers::default())
        .unwrap();
    assert_eq!(mav.model().get("order"), Some(&json!("q,x")));
    assert_eq!(mav.model().get("x"), Some(&json!(5)));
}

#[test]
fn test_handler_can_set_response_headers() {
    let exec = bound(
        HandlerDescriptor::from_fn(
            "with_header",
            Route::get("/h"),
            vec![ParameterSpec::response("resp")],
            |args| {
                if let Some(resp) = args.response() {
                    resp.set_header("x-handled", "yes");
                }
                Ok("done")
            },
        ),
        &[],
    );
    let req = HttpRequest::new(Method::GET, "/h");
    let mut resp = HttpResponse::new();

    exec.execute(&req, &mut resp, &ArgumentResolvers::default())
        .unwrap();
    assert_eq!(resp.header("x-handled"), Some("yes"));
    assert!(!resp.is_committed());
}

#[test]
fn test_binding_failure_propagates_unchanged() {
    let exec = bound(
        HandlerDescriptor::new(
            "show_user",
            Route::get("/users/{id}"),
            vec![ParameterSpec::path_variable("id", DeclaredType::Long)],
            ShowUser,
        ),
        &[("id", "abc")],
    );
    let req = HttpRequest::new(Method::GET, "/users/abc");
    let mut resp = HttpResponse::new();

    let err = exec
        .execute(&req, &mut resp, &ArgumentResolvers::default())
        .unwrap_err();
    assert!(matches!(err, DispatchError::CoercionFailed { raw, target } if raw == "abc" && target == DeclaredType::Long));
}

#[test]
fn test_handler_failure_is_wrapped() {
    let exec = bound(
        HandlerDescriptor::from_fn("boom", Route::get("/boom"), vec![], |_args| {
            Err::<String, _>(anyhow!("database unavailable"))
        }),
        &[],
    );
    let req = HttpRequest::new(Method::GET, "/boom");
    let mut resp = HttpResponse::new();

    let err = exec
        .execute(&req, &mut resp, &ArgumentResolvers::default())
        .unwrap_err();
    assert!(matches!(err, DispatchError::Handler(_)));
}

#[test]
fn test_handler_returned_dispatch_error_is_not_rewrapped() {
    let exec = bound(
        HandlerDescriptor::from_fn("strict", Route::get("/strict"), vec![], |_args| {
            Err::<String, _>(
                DispatchError::MissingRequiredParameter {
                    name: "token".to_string(),
                }
                .into(),
            )
        }),
        &[],
    );
    let req = HttpRequest::new(Method::GET, "/strict");
    let mut resp = HttpResponse::new();

    let err = exec
        .execute(&req, &mut resp, &ArgumentResolvers::default())
        .unwrap_err();
    assert!(matches!(err, DispatchError::MissingRequiredParameter { .. }));
}

#[test]
fn test_legacy_controller() {
    let controller = |req: &HttpRequest, _resp: &mut HttpResponse| -> anyhow::Result<String> {
        Ok(format!("legacy{}", req.path()))
    };
    let exec = HandlerExecution::Legacy {
        path: "/old".to_string(),
        controller: Arc::new(controller),
    };
    let req = HttpRequest::new(Method::DELETE, "/old");
    let mut resp = HttpResponse::new();

    let mav = exec
        .execute(&req, &mut resp, &ArgumentResolvers::default())
        .unwrap();
    assert_eq!(mav.view_name(), Some("legacy/old"));
    assert!(exec.path_variables().is_empty());
}
