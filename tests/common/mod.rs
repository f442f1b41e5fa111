//! Shared fixtures for the integration tests
#![allow(dead_code)]

pub mod fixtures {
    use brrtmvc::coerce::DeclaredType;
    use brrtmvc::dispatcher::Dispatcher;
    use brrtmvc::error::DispatchError;
    use brrtmvc::handler::HandlerDescriptor;
    use brrtmvc::server::{HttpRequest, HttpResponse};
    use brrtmvc::spec::{ParameterSpec, Route};
    use brrtmvc::view::{MiniJinjaRenderer, ModelAndView, TemplateRenderer};
    use http::Method;
    use std::sync::Arc;

    /// In-memory templates for the views the fixtures name
    pub fn renderer() -> Arc<dyn TemplateRenderer> {
        Arc::new(MiniJinjaRenderer::from_sources([
            ("greeting.html", "Hello, {{ name }}!"),
            ("profile.html", "Profile {{ id }}"),
            ("home.html", "home"),
        ]))
    }

    /// Descriptor whose handler always names `view`
    pub fn descriptor(name: &str, route: Route, view: &'static str) -> HandlerDescriptor {
        HandlerDescriptor::from_fn(name, route, Vec::<ParameterSpec>::new(), move |_args| {
            Ok(view)
        })
    }

    /// `GET /greet/{name}` -> `greeting` with `{name}`
    pub fn greeting_dispatcher() -> Dispatcher {
        Dispatcher::builder()
            .renderer(renderer())
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
            .unwrap()
    }

    /// Dispatch a request built from `method` and `target`
    pub fn send(
        dispatcher: &Dispatcher,
        method: Method,
        target: &str,
    ) -> (Result<(), DispatchError>, HttpResponse) {
        let request = HttpRequest::new(method, target);
        let mut response = HttpResponse::new();
        let result = dispatcher.dispatch(&request, &mut response);
        (result, response)
    }
}

pub mod log_capture {
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log lines in memory
    #[derive(Clone, Default)]
    pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` with a thread-local debug-level subscriber and return its output
    pub fn capture<F: FnOnce()>(f: F) -> String {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }
}
