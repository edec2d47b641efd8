//! Behavioural tests for per-request locale resolution.

use std::cell::RefCell;

use fracturism::domain::{
    CountryLocaleMap, Locale, LocaleSignals, LocaleSource, Resolution, RoutingPolicy, resolve,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct RequestInputs {
    path: String,
    cookie: Option<String>,
    accept_language: Option<String>,
    geo_country: Option<String>,
}

#[derive(Debug, Default)]
struct ResolutionWorld {
    inputs: RefCell<RequestInputs>,
    resolution: RefCell<Option<Resolution>>,
}

impl ResolutionWorld {
    fn with_resolution<R>(&self, f: impl FnOnce(&Resolution) -> R) -> R {
        let resolution = self.resolution.borrow();
        f(resolution.as_ref().expect("locale should have been resolved"))
    }

    fn redirect_source(&self) -> LocaleSource {
        self.with_resolution(|resolution| match resolution {
            Resolution::Redirect(redirect) => redirect.decision.source,
            Resolution::PassThrough(decision) => panic!("expected redirect, got {decision:?}"),
        })
    }

    fn persists_preference(&self) -> bool {
        self.with_resolution(|resolution| match resolution {
            Resolution::Redirect(redirect) => redirect.persists_preference(),
            Resolution::PassThrough(decision) => panic!("expected redirect, got {decision:?}"),
        })
    }
}

#[fixture]
fn world() -> ResolutionWorld {
    ResolutionWorld::default()
}

#[given("a request for {path}")]
fn a_request_for(world: &ResolutionWorld, path: String) {
    world.inputs.borrow_mut().path = path;
}

#[given("the preference cookie holds {value}")]
fn the_preference_cookie_holds(world: &ResolutionWorld, value: String) {
    world.inputs.borrow_mut().cookie = Some(value);
}

#[given("the Accept-Language header is {value}")]
fn the_accept_language_header_is(world: &ResolutionWorld, value: String) {
    world.inputs.borrow_mut().accept_language = Some(value);
}

#[given("the geo country is {code}")]
fn the_geo_country_is(world: &ResolutionWorld, code: String) {
    world.inputs.borrow_mut().geo_country = Some(code);
}

#[when("the locale is resolved")]
fn the_locale_is_resolved(world: &ResolutionWorld) {
    let inputs = world.inputs.borrow();
    let signals = LocaleSignals {
        path: &inputs.path,
        cookie: inputs.cookie.as_deref(),
        accept_language: inputs.accept_language.as_deref(),
        geo_country: inputs.geo_country.as_deref(),
    };
    let resolution = resolve(
        &signals,
        &CountryLocaleMap::default(),
        &RoutingPolicy::default(),
    );
    *world.resolution.borrow_mut() = Some(resolution);
}

#[then("the request is redirected to {location}")]
fn the_request_is_redirected_to(world: &ResolutionWorld, location: String) {
    world.with_resolution(|resolution| match resolution {
        Resolution::Redirect(redirect) => assert_eq!(redirect.location, location),
        Resolution::PassThrough(decision) => panic!("expected redirect, got {decision:?}"),
    });
}

#[then("the locale came from the {source} signal")]
fn the_locale_came_from(world: &ResolutionWorld, source: String) {
    let expected = match source.as_str() {
        "cookie" => LocaleSource::Cookie,
        "header" => LocaleSource::Header,
        "geo" => LocaleSource::Geo,
        "default" => LocaleSource::Default,
        other => panic!("unknown locale source: {other}"),
    };
    assert_eq!(world.redirect_source(), expected);
}

#[then("the preference cookie is written")]
fn the_preference_cookie_is_written(world: &ResolutionWorld) {
    assert!(world.persists_preference());
}

#[then("the preference cookie is not rewritten")]
fn the_preference_cookie_is_not_rewritten(world: &ResolutionWorld) {
    assert!(!world.persists_preference());
}

#[then("the request passes through with locale {tag}")]
fn the_request_passes_through_with_locale(world: &ResolutionWorld, tag: String) {
    let expected = Locale::from_tag(&tag).expect("supported locale tag");
    world.with_resolution(|resolution| match resolution {
        Resolution::PassThrough(Some(decision)) => {
            assert_eq!(decision.locale, expected);
            assert_eq!(decision.source, LocaleSource::Path);
        }
        other => panic!("expected localised pass-through, got {other:?}"),
    });
}

#[then("the request passes through without a locale")]
fn the_request_passes_through_without_a_locale(world: &ResolutionWorld) {
    world.with_resolution(|resolution| {
        assert_eq!(resolution, &Resolution::PassThrough(None));
    });
}

#[scenario(
    path = "tests/features/locale_resolution.feature",
    name = "Browser language picks the locale"
)]
fn browser_language_picks_the_locale(world: ResolutionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/locale_resolution.feature",
    name = "A stored preference wins over every other signal"
)]
fn a_stored_preference_wins(world: ResolutionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/locale_resolution.feature",
    name = "An unsupported cookie falls through to geo detection"
)]
fn an_unsupported_cookie_falls_through(world: ResolutionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/locale_resolution.feature",
    name = "Unmapped countries use the unknown-country locale"
)]
fn unmapped_countries_use_the_unknown_country_locale(world: ResolutionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/locale_resolution.feature",
    name = "No signal falls back to Romanian"
)]
fn no_signal_falls_back_to_romanian(world: ResolutionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/locale_resolution.feature",
    name = "Localised paths are left alone"
)]
fn localised_paths_are_left_alone(world: ResolutionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/locale_resolution.feature",
    name = "Reserved prefixes are never localised"
)]
fn reserved_prefixes_are_never_localised(world: ResolutionWorld) {
    drop(world);
}
