use apidef_eval::{AttributeArgs, Evaluator};

use super::{
    ApiSpec, AttributeSpec, DesignFile, ErrorSpec, MemberSpec, MethodSpec, ResponseSpec,
    ServiceSpec, TypeName,
};

/// Make the builder calls described by `file`.
pub fn replay(file: &DesignFile, ev: &mut Evaluator) {
    if let Some(api) = &file.api {
        replay_api(api, ev);
    }
    for ty in &file.types {
        ev.user_type(&ty.name, |ev| {
            if let Some(description) = &ty.description {
                ev.description(description);
            }
            members(&ty.attributes, ev);
        });
    }
    for svc in &file.services {
        replay_service(svc, ev);
    }
}

fn replay_api(api: &ApiSpec, ev: &mut Evaluator) {
    ev.api(&api.name, |ev| {
        if let Some(title) = &api.title {
            ev.title(title);
        }
        if let Some(version) = &api.version {
            ev.version(version);
        }
        if let Some(description) = &api.description {
            ev.description(description);
        }

        let http = &api.http;
        if let Some(path) = &http.path {
            ev.path(path);
        }
        for scheme in &http.schemes {
            ev.scheme(scheme);
        }
        for mime in &http.consumes {
            ev.consumes(mime);
        }
        for mime in &http.produces {
            ev.produces(mime);
        }
        for response in &http.responses {
            ev.response(&response.name, response.status);
        }
    });
}

fn replay_service(svc: &ServiceSpec, ev: &mut Evaluator) {
    ev.service(&svc.name, |ev| {
        if let Some(description) = &svc.description {
            ev.description(description);
        }
        for error in &svc.errors {
            replay_error(error, ev);
        }
        if let Some(http) = &svc.http {
            ev.http(|ev| {
                if let Some(path) = &http.path {
                    ev.path(path);
                }
                if let Some(media_type) = &http.media_type {
                    ev.media_type(media_type);
                }
            });
        }
        for method in &svc.methods {
            replay_method(method, ev);
        }
    });
}

fn replay_method(method: &MethodSpec, ev: &mut Evaluator) {
    ev.method(&method.name, |ev| {
        if let Some(description) = &method.description {
            ev.description(description);
        }
        if let Some(payload) = &method.payload {
            let args = args(&payload.ty, &payload.description);
            if has_members(payload) {
                ev.payload_with(args, |ev| members(&payload.attributes, ev));
            } else {
                ev.payload(args);
            }
        }
        if let Some(result) = &method.result {
            let args = args(&result.ty, &result.description);
            if has_members(result) {
                ev.result_with(args, |ev| members(&result.attributes, ev));
            } else {
                ev.result(args);
            }
        }
        for error in &method.errors {
            replay_error(error, ev);
        }
        if let Some(http) = &method.http {
            ev.http(|ev| {
                for route in &http.routes {
                    ev.route(route.method.0, &route.path);
                }
                for response in &http.responses {
                    match response {
                        ResponseSpec::Status(code) => ev.status(*code),
                        ResponseSpec::Named(name) => ev.response_ref(name),
                    }
                }
            });
        }
    });
}

fn replay_error(error: &ErrorSpec, ev: &mut Evaluator) {
    let mut args = args(&error.ty, &error.description);
    if error.override_builtin {
        args = args.override_builtin();
    }
    if error.attributes.is_empty() {
        ev.error(&error.name, args);
    } else {
        ev.error_with(&error.name, args, |ev| members(&error.attributes, ev));
    }
}

fn members(specs: &[MemberSpec], ev: &mut Evaluator) {
    for member in specs {
        let args = args(&member.ty, &member.description);
        if member.attributes.is_empty() {
            ev.attribute(&member.name, args);
        } else {
            ev.attribute_with(&member.name, args, |ev| members(&member.attributes, ev));
        }
    }
}

fn has_members(spec: &AttributeSpec) -> bool {
    !spec.attributes.is_empty()
}

fn args(ty: &Option<TypeName>, description: &Option<String>) -> AttributeArgs {
    let mut args = AttributeArgs::new();
    if let Some(TypeName(ty)) = ty {
        args = args.with_type(ty.clone());
    }
    if let Some(description) = description {
        args = args.with_description(description.clone());
    }
    args
}
