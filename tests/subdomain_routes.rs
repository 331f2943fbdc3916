//! Subdomain scoping, recognition and URL generation through the public API.

use axum::http::Method;

use subdomain_routes::routing::{
    Endpoint, GroupName, RequestEnvironment, ResourceOptions, RouteSet, ScopeOptions,
    SubdomainOptions,
};
use subdomain_routes::urls::{PolymorphicTarget, UrlOptions};
use subdomain_routes::RoutingError;

mod common;
use common::{map_subdomain, map_subdomain_with, param, params, with_host, Item, User, LABEL_SETS};

fn labels(set: &[&str]) -> Vec<String> {
    set.iter().map(|label| label.to_string()).collect()
}

fn captured_scope(set: &[&str], options: SubdomainOptions) -> ScopeOptions {
    let mut seen = None;
    map_subdomain_with(set, options, |scope| {
        seen = Some(scope.options().clone());
        Ok(())
    })
    .unwrap();
    seen.unwrap()
}

#[test]
fn test_block_sees_exact_labels() {
    let duplicated: &[&str] = &["admin", "admin"];
    for &set in LABEL_SETS.iter().chain(std::iter::once(&duplicated)) {
        let scope = captured_scope(set, SubdomainOptions::new());
        assert_eq!(scope.subdomains(), Some(&labels(set)[..]), "labels {:?}", set);
    }
}

#[test]
fn test_empty_labels_are_rejected() {
    let mut ran = false;
    let result = map_subdomain_with(&[], SubdomainOptions::new(), |_| {
        ran = true;
        Ok(())
    });
    assert_eq!(result.unwrap_err(), RoutingError::NoSubdomains);
    assert!(!ran);
}

#[test]
fn test_default_naming_uses_first_label() {
    for &set in LABEL_SETS {
        let scope = captured_scope(set, SubdomainOptions::new());
        assert_eq!(scope.namespace(), Some(format!("{}/", set[0]).as_str()));
        assert_eq!(scope.name_prefix(), Some(format!("{}_", set[0]).as_str()));
    }
}

#[test]
fn test_explicit_and_suppressed_naming() {
    for &set in LABEL_SETS {
        let scope = captured_scope(set, SubdomainOptions::named("something"));
        assert_eq!(scope.namespace(), Some("something/"));
        assert_eq!(scope.name_prefix(), Some("something_"));

        let scope = captured_scope(set, SubdomainOptions::unnamed());
        assert_eq!(scope.namespace(), None);
        assert_eq!(scope.name_prefix(), None);
    }
    assert_eq!(SubdomainOptions::unnamed().name, GroupName::Suppressed);
}

#[test]
fn test_subdomains_alias() {
    let mut seen = None;
    RouteSet::draw(|map| {
        map.subdomains(["books", "dvds"], SubdomainOptions::new(), |scope| {
            seen = Some(scope.options().clone());
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();
    assert_eq!(seen.unwrap(), captured_scope(&["books", "dvds"], SubdomainOptions::new()));
}

#[test]
fn test_every_rule_carries_the_condition() {
    for &set in LABEL_SETS {
        let routes = map_subdomain_with(set, SubdomainOptions::new(), |scope| {
            scope.resources_with("articles", ResourceOptions::new().has_many(["comments"]), |article| {
                article.resource("preview")?;
                Ok(())
            })?;
            scope.namespace("reports", |reports| {
                reports.connect("/daily/:day", Endpoint::to("daily", "show"))?;
                Ok(())
            })?;
            scope.root(Endpoint::to("dashboard", "show"))?;
            Ok(())
        })
        .unwrap();

        assert!(routes.len() > 14);
        for rule in routes.routes() {
            assert_eq!(rule.conditions().subdomains, Some(labels(set)), "rule {}", rule);
            let expected = if set.len() == 1 { Some(set[0]) } else { None };
            assert_eq!(rule.requirements().subdomain.as_deref(), expected, "rule {}", rule);
        }
    }
}

#[test]
fn test_recognizes_on_matching_subdomain() {
    let routes = map_subdomain(&["admin"], SubdomainOptions::new()).unwrap();
    let params = routes
        .recognize_path(Method::GET, "admin.example.com", "/items/2")
        .unwrap();
    assert_eq!(param(&params, "controller"), Some("admin/items"));
    assert_eq!(param(&params, "action"), Some("show"));
    assert_eq!(param(&params, "id"), Some("2"));
}

#[test]
fn test_wrong_subdomain_is_not_found() {
    let routes = map_subdomain(&["support"], SubdomainOptions::new()).unwrap();
    let err = routes
        .recognize_path(Method::GET, "admin.example.com", "/items/2")
        .unwrap_err();
    assert_eq!(
        err,
        RoutingError::NoRouteMatches {
            method: "GET".into(),
            path: "/items/2".into()
        }
    );
}

#[test]
fn test_multi_label_recognition() {
    let routes = map_subdomain(&["books", "dvds", "cds"], SubdomainOptions::unnamed()).unwrap();
    for host in ["books.example.com", "DVDS.example.com", "cds.example.com:3000"] {
        let params = routes.recognize_path(Method::GET, host, "/items").unwrap();
        assert_eq!(param(&params, "controller"), Some("items"), "host {}", host);
    }
    assert!(routes
        .recognize_path(Method::GET, "www.example.com", "/items")
        .is_err());
}

#[test]
fn test_environment_subdomain() {
    let env = RequestEnvironment::new(Method::GET, "www.example.com", "/nowhere").unwrap();
    assert_eq!(env.subdomain, "www");

    let routes = map_subdomain(&["admin"], SubdomainOptions::new()).unwrap();
    assert!(routes.recognize(&env).is_err());
    assert_eq!(env.subdomain, "www");
}

#[test]
fn test_generation_on_same_subdomain() {
    let writer = with_host(
        map_subdomain(&["admin"], SubdomainOptions::new()).unwrap(),
        "admin.example.com",
    );
    assert_eq!(
        writer.url_for("admin_users", &params(&[])).unwrap(),
        "http://admin.example.com/users"
    );
    assert_eq!(writer.path_for("admin_users", &params(&[])).unwrap(), "/users");
}

#[test]
fn test_generation_from_other_subdomain_is_absolute() {
    let writer = with_host(
        map_subdomain(&["admin"], SubdomainOptions::new()).unwrap(),
        "www.example.com",
    );
    assert_eq!(
        writer.url_for("admin_users", &params(&[])).unwrap(),
        "http://admin.example.com/users"
    );
    assert_eq!(
        writer.path_for("admin_users", &params(&[])).unwrap(),
        "http://admin.example.com/users"
    );
    assert_eq!(
        writer.path_for("edit_admin_user", &params(&[("id", "4")])).unwrap(),
        "http://admin.example.com/users/4/edit"
    );
}

#[test]
fn test_multi_label_generation_is_host_unaware() {
    let set = ["books", "dvds", "cds"];
    for host in ["books.example.com", "dvds.example.com", "www.example.com"] {
        let writer = with_host(map_subdomain(&set, SubdomainOptions::unnamed()).unwrap(), host);
        assert_eq!(
            writer.url_for("items", &params(&[])).unwrap(),
            format!("http://{}/items", host)
        );
        assert_eq!(writer.path_for("items", &params(&[])).unwrap(), "/items");
    }
}

#[test]
fn test_ip_host_is_not_rewritten() {
    let writer = with_host(
        map_subdomain(&["admin"], SubdomainOptions::new()).unwrap(),
        "127.0.0.1:3000",
    );
    assert_eq!(writer.path_for("admin_users", &params(&[])).unwrap(), "/users");
    assert_eq!(
        writer.url_for("admin_users", &params(&[])).unwrap(),
        "http://127.0.0.1:3000/users"
    );
}

#[test]
fn test_polymorphic_helpers() {
    let admin = with_host(
        map_subdomain(&["admin"], SubdomainOptions::new()).unwrap(),
        "www.example.com",
    );
    let user = User { id: Some(5) };
    let targets = [PolymorphicTarget::Namespace("admin"), PolymorphicTarget::Record(&user)];
    assert_eq!(
        admin.polymorphic_url(&targets).unwrap(),
        "http://admin.example.com/users/5"
    );
    assert_eq!(
        admin.polymorphic_path(&targets).unwrap(),
        "http://admin.example.com/users/5"
    );

    let shop = with_host(
        map_subdomain(&["books", "dvds"], SubdomainOptions::unnamed()).unwrap(),
        "www.example.com",
    );
    let item = Item { id: Some(3) };
    assert_eq!(
        shop.polymorphic_path(&[PolymorphicTarget::Record(&item)]).unwrap(),
        "/items/3"
    );
    let fresh = Item { id: None };
    assert_eq!(
        shop.polymorphic_path(&[PolymorphicTarget::Record(&fresh)]).unwrap(),
        "/items"
    );
}

#[test]
fn test_declaration_order_wins() {
    let routes = map_subdomain(&["admin"], SubdomainOptions::new()).unwrap();
    let params = routes
        .recognize_path(Method::GET, "admin.example.com", "/items/new")
        .unwrap();
    assert_eq!(param(&params, "action"), Some("new"));
}

#[test]
fn test_head_matches_get() {
    let routes = map_subdomain(&["admin"], SubdomainOptions::new()).unwrap();
    let params = routes
        .recognize_path(Method::HEAD, "admin.example.com", "/users/1")
        .unwrap();
    assert_eq!(param(&params, "action"), Some("show"));

    let params = routes
        .recognize_path(Method::PUT, "admin.example.com", "/users/1")
        .unwrap();
    assert_eq!(param(&params, "action"), Some("update"));
}

#[test]
fn test_path_normalization() {
    let routes = map_subdomain(&["admin"], SubdomainOptions::new()).unwrap();
    let params = routes
        .recognize_path(Method::GET, "admin.example.com", "//items//2/")
        .unwrap();
    assert_eq!(param(&params, "id"), Some("2"));
}

#[test]
fn test_extra_params_become_query_string() {
    let writer = with_host(
        map_subdomain(&["admin"], SubdomainOptions::new()).unwrap(),
        "admin.example.com",
    );
    let path = writer
        .path_for("admin_users", &params(&[("sort", "name"), ("page", "2")]))
        .unwrap();
    assert_eq!(path, "/users?page=2&sort=name");

    let options = UrlOptions::url().with_protocol("https").with_anchor("list");
    let url = writer
        .url_for_with("admin_users", &params(&[("q", "a&b")]), &options)
        .unwrap();
    assert_eq!(url, "https://admin.example.com/users?q=a%26b#list");
}

#[test]
fn test_segment_values_escaped_alike_in_paths_and_urls() {
    let writer = with_host(
        map_subdomain(&["admin"], SubdomainOptions::new()).unwrap(),
        "admin.example.com",
    );
    let id = params(&[("id", "a?b c/d")]);
    let path = writer.path_for("admin_user", &id).unwrap();
    let url = writer.url_for("admin_user", &id).unwrap();
    assert_eq!(path, "/users/a%3Fb%20c%2Fd");
    assert_eq!(url, format!("http://admin.example.com{}", path));

    let forced = with_host(
        map_subdomain(&["admin"], SubdomainOptions::new()).unwrap(),
        "www.example.com",
    );
    assert_eq!(forced.path_for("admin_user", &id).unwrap(), url);
}

#[test]
fn test_generated_path_recognizes_back() {
    let routes = map_subdomain(&["admin"], SubdomainOptions::new()).unwrap();
    let writer = with_host(
        map_subdomain(&["admin"], SubdomainOptions::new()).unwrap(),
        "admin.example.com",
    );
    let path = writer.path_for("admin_user", &params(&[("id", "a b")])).unwrap();
    assert_eq!(path, "/users/a%20b");

    let recognized = routes
        .recognize_path(Method::GET, "admin.example.com", &path)
        .unwrap();
    assert_eq!(param(&recognized, "id"), Some("a b"));
}

#[test]
fn test_nested_subdomain_block_replaces_set() {
    let routes = RouteSet::draw(|map| {
        map.subdomain(["admin"], SubdomainOptions::new(), |admin| {
            admin.resources("users")?;
            admin.subdomain(["support"], SubdomainOptions::new(), |support| {
                support.resources("tickets")?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();

    let tickets = routes.named_route("support_tickets").unwrap();
    assert_eq!(tickets.conditions().subdomains, Some(labels(&["support"])));
    assert_eq!(tickets.controller(), Some("support/tickets"));
    assert!(routes
        .recognize_path(Method::GET, "admin.example.com", "/tickets")
        .is_err());
    assert!(routes
        .recognize_path(Method::GET, "support.example.com", "/tickets")
        .is_ok());
}

#[test]
fn test_routes_outside_blocks_match_any_subdomain() {
    let routes = RouteSet::draw(|map| {
        map.subdomain(["admin"], SubdomainOptions::new(), |admin| {
            admin.resources("users")?;
            Ok(())
        })?;
        map.connect("/:controller/:action/:id", Endpoint::new())?;
        Ok(())
    })
    .unwrap();

    for host in ["admin.example.com", "www.example.com", "localhost"] {
        let params = routes.recognize_path(Method::GET, host, "/pages/show/1").unwrap();
        assert_eq!(param(&params, "controller"), Some("pages"));
    }
}
