//! Derive phase - completes the HTTP projection of a valid graph.

use apidef_expr::{
    EncodingExpr, HttpResponseExpr, HttpRoot, MethodExpr, ResponseRef, RootExpr,
};
use eyre::{Result, eyre};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that copies the API-wide HTTP settings onto the root projection and
/// builds one resource per service, with one action per method.
///
/// Actions that declare no response get the built-in `OK` response.
pub struct DerivePhase;

impl Phase for DerivePhase {
    fn name(&self) -> &'static str {
        "derive"
    }

    fn description(&self) -> &'static str {
        "Build the HTTP resources and actions"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let RootExpr {
            api,
            services,
            http,
            ..
        } = &mut ctx.root;

        if let Some(api) = api {
            http.path = api.http.path.clone();
            http.schemes = api.http.schemes.clone();
            http.consumes = encodings(&api.http.consumes);
            http.produces = encodings(&api.http.produces);
            http.responses = api.http.responses.clone();
        }

        for svc in services.iter() {
            let responses = svc
                .methods
                .iter()
                .map(|m| action_responses(http, m))
                .collect::<Result<Vec<_>>>()?;

            let resource = http.resource_for(svc);
            for (action, responses) in resource.actions_mut().iter_mut().zip(responses) {
                action.responses = responses;
            }
        }

        tracing::debug!(resources = http.resources().len(), "derived http projection");
        Ok(())
    }
}

fn encodings(mime_types: &[String]) -> Vec<EncodingExpr> {
    mime_types
        .iter()
        .map(|m| EncodingExpr {
            mime_type: m.clone(),
        })
        .collect()
}

fn action_responses(http: &HttpRoot, method: &MethodExpr) -> Result<Vec<HttpResponseExpr>> {
    let declared = method
        .http
        .as_ref()
        .map(|h| h.responses.as_slice())
        .unwrap_or_default();

    if declared.is_empty() {
        let ok = http
            .default_response("OK")
            .cloned()
            .unwrap_or_else(|| HttpResponseExpr::new("OK", 200));
        return Ok(vec![ok]);
    }

    declared
        .iter()
        .map(|response| match response {
            ResponseRef::Status(code) => Ok(by_status(http, *code)),
            ResponseRef::Named(name) => http
                .resolve_response(name)
                .cloned()
                .ok_or_else(|| eyre!("response \"{}\" of method \"{}\" is not defined", name, method.name)),
        })
        .collect()
}

/// A response for `code`: the first named response with that status, or an
/// anonymous one named after the code.
fn by_status(http: &HttpRoot, code: u16) -> HttpResponseExpr {
    http.responses
        .iter()
        .chain(http.default_responses.iter())
        .find(|r| r.status == code)
        .cloned()
        .unwrap_or_else(|| HttpResponseExpr::new(code.to_string(), code))
}

#[cfg(test)]
mod tests {
    use apidef_eval::evaluate;

    use super::*;

    fn derive(ctx: &mut CompilationContext) {
        DerivePhase.run(ctx).unwrap();
    }

    #[test]
    fn test_resources_follow_services() {
        let evaluation = evaluate(|ev| {
            ev.service("divider", |ev| {
                ev.http(|ev| ev.path("/div"));
                ev.method("divide", |_| {});
                ev.method("modulo", |_| {});
            });
        });
        let mut ctx = CompilationContext::from(evaluation);
        derive(&mut ctx);

        let resource = ctx.root.http.resource("divider").unwrap();
        assert_eq!(resource.path.as_deref(), Some("/div"));
        assert_eq!(resource.media_type, "text/plain");
        let names: Vec<_> = resource.actions().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["divide", "modulo"]);
    }

    #[test]
    fn test_default_ok_response() {
        let evaluation = evaluate(|ev| {
            ev.service("divider", |ev| ev.method("divide", |_| {}));
        });
        let mut ctx = CompilationContext::from(evaluation);
        derive(&mut ctx);

        let action = &ctx.root.http.resources()[0].actions()[0];
        assert_eq!(action.responses, vec![HttpResponseExpr::new("OK", 200)]);
    }

    #[test]
    fn test_declared_responses_resolve() {
        let evaluation = evaluate(|ev| {
            ev.api("calc", |ev| {
                ev.path("/api");
                ev.consumes("application/json");
                ev.response("Teapot", 418);
            });
            ev.service("divider", |ev| {
                ev.method("divide", |ev| {
                    ev.http(|ev| {
                        ev.post("/divide");
                        ev.status(201);
                        ev.status(299);
                        ev.response_ref("Teapot");
                    });
                });
            });
        });
        let mut ctx = CompilationContext::from(evaluation);
        derive(&mut ctx);

        let http = &ctx.root.http;
        assert_eq!(http.path.as_deref(), Some("/api"));
        assert_eq!(http.consumes[0].mime_type, "application/json");

        let action = &http.resources()[0].actions()[0];
        assert_eq!(action.routes[0].path, "/divide");
        let responses: Vec<_> = action
            .responses
            .iter()
            .map(|r| (r.name.as_str(), r.status))
            .collect();
        assert_eq!(responses, vec![("Created", 201), ("299", 299), ("Teapot", 418)]);
    }
}
