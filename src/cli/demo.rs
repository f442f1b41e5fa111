use crate::coerce::DeclaredType;
use crate::dispatcher::Dispatcher;
use crate::error::RegistrationError;
use crate::handler::HandlerOutput;
use crate::resolver::Arguments;
use crate::runtime_config::RuntimeConfig;
use crate::server::{HttpRequest, HttpResponse};
use crate::spec::{ParameterSpec, Route};
use crate::view::{ModelAndView, View};

/// The small application the CLI dispatches against
///
/// | Route                 | Handler    | Outcome                            |
/// |-----------------------|------------|------------------------------------|
/// | `GET /greet/{name}`   | `greet`    | `greeting` template                |
/// | `POST /login`         | `login`    | redirect to `/dashboard`           |
/// | `GET /dashboard`      | `dashboard`| `dashboard` template               |
/// | `GET /users/{id}`     | `show_user`| `user` template, `id` as a long    |
/// | `GET /api/users/{id}` | `user_json`| JSON model                         |
/// | any `/health`         | `health`   | JSON model, `cache-control` header |
/// | any `/`               | legacy     | `index` template                   |
///
/// # Errors
///
/// Never in practice; registration errors are surfaced for completeness.
pub fn demo_dispatcher(config: RuntimeConfig) -> Result<Dispatcher, RegistrationError> {
    Dispatcher::builder()
        .config(config)
        .route(
            "greet",
            Route::get("/greet/{name}"),
            vec![
                ParameterSpec::path_variable("name", DeclaredType::String),
                ParameterSpec::request_param("salutation", DeclaredType::String)
                    .with_default("Hello"),
            ],
            greet,
        )
        .route(
            "login",
            Route::post("/login"),
            vec![
                ParameterSpec::request_param("user", DeclaredType::String),
                ParameterSpec::request_param("password", DeclaredType::String).with_default(""),
            ],
            login,
        )
        .route("dashboard", Route::get("/dashboard"), vec![], |_args| {
            Ok("dashboard")
        })
        .route(
            "show_user",
            Route::get("/users/{id}"),
            vec![
                ParameterSpec::path_variable("id", DeclaredType::Long),
                ParameterSpec::header("accept-language", DeclaredType::String).with_default("en"),
            ],
            show_user,
        )
        .route(
            "user_json",
            Route::get("/api/users/{id}"),
            vec![ParameterSpec::path_variable("id", DeclaredType::Long)],
            |args| {
                let id: i64 = args.get("id")?;
                Ok(ModelAndView::with_view(View::json())
                    .add("id", id)
                    .add("name", format!("user-{id}")))
            },
        )
        .route(
            "health",
            Route::any("/health"),
            vec![ParameterSpec::response("response")],
            health,
        )
        .legacy("/", index)
        .build()
}

fn greet(args: &mut Arguments<'_>) -> anyhow::Result<ModelAndView> {
    let name: String = args.get("name")?;
    let salutation: String = args.get("salutation")?;
    Ok(ModelAndView::new("greeting")
        .add("name", name)
        .add("salutation", salutation))
}

fn login(args: &mut Arguments<'_>) -> anyhow::Result<String> {
    let user: String = args.get("user")?;
    let password: String = args.get("password")?;
    if password.is_empty() {
        let user: String = url::form_urlencoded::byte_serialize(user.as_bytes()).collect();
        return Ok(format!("redirect:/?login_failed={user}"));
    }
    Ok("redirect:/dashboard".to_string())
}

fn show_user(args: &mut Arguments<'_>) -> anyhow::Result<ModelAndView> {
    let id: i64 = args.get("id")?;
    let lang: String = args.get("accept-language")?;
    Ok(ModelAndView::new("user").add("id", id).add("lang", lang))
}

fn health(args: &mut Arguments<'_>) -> anyhow::Result<HandlerOutput> {
    if let Some(response) = args.response() {
        response.set_header("cache-control", "no-store");
    }
    Ok(ModelAndView::with_view(View::json())
        .add("status", "ok")
        .into())
}

fn index(_request: &HttpRequest, _response: &mut HttpResponse) -> anyhow::Result<String> {
    Ok("index".to_string())
}
