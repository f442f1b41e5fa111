// Scalability tests for the linear-scan route table
//
// Lookup walks entries in registration order, so cost grows with the number
// of routes. These tests keep that cost within a comfortable bound for the
// table sizes a single application registers.

use super::RouteTable;
use crate::coerce::DeclaredType;
use crate::handler::HandlerDescriptor;
use crate::spec::{ParameterSpec, Route};
use http::Method;
use std::time::Instant;

fn descriptor(route: Route, handler: &str) -> HandlerDescriptor {
    HandlerDescriptor::from_fn(handler, route, Vec::<ParameterSpec>::new(), |_args| Ok("ok"))
}

#[test]
fn test_route_table_with_many_routes() {
    let mut table = RouteTable::new();
    for i in 0..500 {
        table
            .register(descriptor(
                Route::get(format!("/api/v1/resource{}/{{id}}", i)),
                &format!("handler_{}", i),
            ))
            .unwrap();
    }
    assert_eq!(table.len(), 500);

    let start = Instant::now();
    for _ in 0..1000 {
        let result = table.find(&Method::GET, "/api/v1/resource250/123");
        assert!(result.is_some());
    }
    let duration = start.elapsed();

    // Generous bound: unoptimized test builds on shared CI runners
    assert!(
        duration.as_millis() < 2000,
        "Route table lookup degraded: {}ms for 1000 lookups with 500 routes",
        duration.as_millis()
    );
}

#[test]
fn test_route_table_deep_paths() {
    let mut table = RouteTable::new();
    for path in ["/a", "/a/b", "/a/b/c", "/a/b/c/d", "/a/b/c/d/e", "/a/b/c/d/e/f"] {
        table.register(descriptor(Route::get(path), path)).unwrap();
    }

    let m = table.find(&Method::GET, "/a/b/c/d/e/f").unwrap();
    assert_eq!(m.descriptor.name, "/a/b/c/d/e/f");
    assert!(table.find(&Method::GET, "/a/b/c/d/e/f/g").is_none());
}

#[test]
fn test_route_table_parameter_extraction() {
    let mut table = RouteTable::new();
    table
        .register(HandlerDescriptor::from_fn(
            "get_comment",
            Route::get("/api/{version}/users/{user_id}/posts/{post_id}/comments/{comment_id}"),
            vec![ParameterSpec::path_variable("comment_id", DeclaredType::Long)],
            |_args| Ok("comment"),
        ))
        .unwrap();

    for _ in 0..1000 {
        let m = table
            .find(&Method::GET, "/api/v1/users/123/posts/456/comments/789")
            .unwrap();
        assert_eq!(m.path_variables.len(), 4);
        // Four bindings fit inline
        assert!(!m.path_variables.spilled());
    }
}
