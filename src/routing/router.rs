//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the matching route for a method and path
//! - Distinguish "no such path" from "path exists, method not allowed"
//!
//! # Design Decisions
//! - Immutable after startup; shared via `Arc` without locks
//! - O(n) scan over compiled patterns (acceptable for typical route counts)
//! - Most specific pattern wins: literal segments beat parameters
//! - HEAD falls back to GET when no HEAD route exists
//! - Duplicate (method, path) registrations are rejected

use axum::http::{Method, Request};

use crate::routing::error::{MatchError, RegistryError};
use crate::routing::matcher::PathPattern;
use crate::routing::route::{RouteParameters, RouteRegistration, RouteRegistry};

#[derive(Debug, Clone)]
struct CompiledRoute {
    pattern: PathPattern,
    registration: RouteRegistration,
}

/// A matched route with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteRegistration,
    /// Bound constants merged with the values captured from the path.
    pub parameters: RouteParameters,
}

/// In-memory route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteRegistration> {
        self.routes.iter().map(|r| &r.registration)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Match a method and path against the table.
    pub fn match_route(&self, method: &Method, path: &str) -> Result<RouteMatch<'_>, MatchError> {
        let candidates: Vec<(&CompiledRoute, Vec<(String, String)>)> = self
            .routes
            .iter()
            .filter_map(|route| route.pattern.captures(path).map(|captured| (route, captured)))
            .collect();

        let Some(best) = candidates.iter().map(|(r, _)| r.pattern.specificity()).max() else {
            return Err(MatchError::NotFound {
                path: path.to_string(),
            });
        };

        let candidates: Vec<_> = candidates
            .into_iter()
            .filter(|(r, _)| r.pattern.specificity() == best)
            .collect();

        let found = candidates
            .iter()
            .find(|(r, _)| r.registration.method == *method)
            .or_else(|| {
                if *method == Method::HEAD {
                    candidates.iter().find(|(r, _)| r.registration.method == Method::GET)
                } else {
                    None
                }
            })
            .map(|(route, captured)| (*route, captured));

        match found {
            Some((route, captured)) => {
                let mut parameters = route.registration.parameters.clone();
                for (name, value) in captured {
                    parameters.insert(name.as_str(), value.as_str());
                }
                Ok(RouteMatch {
                    route: &route.registration,
                    parameters,
                })
            }
            None => {
                let mut allowed: Vec<Method> = Vec::new();
                for (route, _) in &candidates {
                    if !allowed.contains(&route.registration.method) {
                        allowed.push(route.registration.method.clone());
                    }
                }
                Err(MatchError::MethodNotAllowed {
                    method: method.clone(),
                    path: path.to_string(),
                    allowed,
                })
            }
        }
    }

    /// Match an HTTP request against the table.
    pub fn match_request<B>(&self, req: &Request<B>) -> Result<RouteMatch<'_>, MatchError> {
        self.match_route(req.method(), req.uri().path())
    }
}

impl RouteRegistry for RouteTable {
    fn register(&mut self, route: RouteRegistration) -> Result<(), RegistryError> {
        let pattern = PathPattern::parse(&route.path);

        let duplicate = self.routes.iter().any(|existing| {
            existing.registration.method == route.method && existing.pattern.same_shape(&pattern)
        });
        if duplicate {
            return Err(RegistryError::Duplicate {
                method: route.method,
                path: route.path,
            });
        }

        self.routes.push(CompiledRoute {
            pattern,
            registration: route,
        });
        Ok(())
    }
}
