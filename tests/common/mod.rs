//! Shared fixture for integration tests: a registry of tag types exercising
//! inheritance, composition and aliasing, plus a provider with attachments.

#![allow(dead_code)]

use std::sync::Arc;
use tagcast::application::TagResolver;
use tagcast::domain::{Accessor, AttrValue, RawTag, TagRegistry, TagType, TagTypeId};
use tagcast::infrastructure::InMemoryProvider;

pub struct Fixture {
    pub resolver: TagResolver<InMemoryProvider>,
    /// The @Gett(path = "get") attachment on "WithGet"
    pub gett: Arc<RawTag>,
    /// The @GetJson(path = "test", pretty = true) attachment on "WithGetJson"
    pub get_json: Arc<RawTag>,
    /// The @Cat("Tom") attachment on "MyClass"
    pub cat: Arc<RawTag>,
}

pub fn ty(name: &str) -> TagTypeId {
    TagTypeId::new(name)
}

pub fn registry() -> Arc<TagRegistry> {
    let mut registry = TagRegistry::new();

    // Routing family.
    registry
        .register(
            TagType::named("Route")
                .accessor(Accessor::new("method").with_default(AttrValue::symbol("GET")))
                .accessor(Accessor::new("path").with_default(""))
                .accessor(Accessor::new("regex").with_default("")),
        )
        .unwrap();
    registry
        .register(
            TagType::named("Gett")
                .extends("Route")
                .accessor(Accessor::new("value").with_default("").aliased_to("path"))
                .accessor(Accessor::new("regex").with_default(""))
                .accessor(Accessor::new("path").with_default("")),
        )
        .unwrap();
    registry
        .register(
            TagType::named("Post")
                .extends("Route")
                .attach(RawTag::new("Route").with("method", AttrValue::symbol("POST")))
                .accessor(Accessor::new("path").with_default("")),
        )
        .unwrap();
    registry
        .register(
            TagType::named("SocketJS")
                .extends("Route")
                .accessor(Accessor::new("path").with_default("")),
        )
        .unwrap();

    // Interception family: a double-extends chain with meta-tag defaults.
    registry
        .register(
            TagType::named("Intercept")
                .extends("Route")
                .attach(RawTag::new("Route"))
                .accessor(Accessor::new("type").with_default(AttrValue::symbol("PRE_HANDLER")))
                .accessor(Accessor::new("method").with_default(AttrValue::symbol("GET")))
                .accessor(Accessor::new("path").with_default("")),
        )
        .unwrap();
    registry
        .register(
            TagType::named("PreHandler")
                .extends("Intercept")
                .accessor(Accessor::new("path").with_default(""))
                .accessor(Accessor::new("method").with_default(AttrValue::symbol("GET"))),
        )
        .unwrap();
    registry
        .register(
            TagType::named("AfterSuccess")
                .extends("Intercept")
                .attach(RawTag::new("Intercept").with("type", AttrValue::symbol("AFTER_SUCCESS")))
                .accessor(Accessor::new("path").with_default(""))
                .accessor(Accessor::new("method").with_default(AttrValue::symbol("GET"))),
        )
        .unwrap();

    // Composites.
    registry
        .register(TagType::named("Json").accessor(Accessor::new("pretty").with_default(false)))
        .unwrap();
    registry
        .register(
            TagType::named("GetJson")
                .composed_of(["Gett", "Json"])
                .accessor(
                    Accessor::new("path")
                        .with_default("")
                        .aliased_to_member("Gett", "path"),
                )
                .accessor(
                    Accessor::new("regex")
                        .with_default("")
                        .aliased_to_member("Gett", "regex"),
                )
                .accessor(
                    Accessor::new("pretty")
                        .with_default(false)
                        .aliased_to_member("Json", "pretty"),
                ),
        )
        .unwrap();
    registry
        .register(TagType::named("WithoutDefault").accessor(Accessor::new("value")))
        .unwrap();
    registry
        .register(TagType::named("BaseAndRoute").composed_of(["Base", "Route", "WithoutDefault"]))
        .unwrap();

    // Simple value-override chain.
    registry
        .register(TagType::named("Base").accessor(Accessor::new("value").with_default("Base")))
        .unwrap();
    registry
        .register(
            TagType::named("Mid")
                .extends("Base")
                .accessor(Accessor::new("value").with_default("Mid")),
        )
        .unwrap();
    registry
        .register(
            TagType::named("Sub")
                .extends("Mid")
                .accessor(Accessor::new("value").with_default("Sub")),
        )
        .unwrap();

    // Joint declares extends before composed-of; Joint2 the other way around.
    registry
        .register(
            TagType::named("Joint")
                .extends("Route")
                .attach(
                    RawTag::new("Route")
                        .with("method", AttrValue::symbol("POST"))
                        .with("path", "joint"),
                )
                .composed_of(["Base", "Gett", "Sub"]),
        )
        .unwrap();
    registry
        .register(
            TagType::named("Joint2")
                .composed_of(["Base", "Gett", "Sub"])
                .extends("Route")
                .attach(
                    RawTag::new("Route")
                        .with("method", AttrValue::symbol("POST"))
                        .with("path", "joint"),
                )
                .accessor(Accessor::new("getPath").aliased_to_member("Gett", "path")),
        )
        .unwrap();

    // A three-type extends cycle.
    registry
        .register(TagType::named("CircularBase").extends("CircularMid"))
        .unwrap();
    registry
        .register(TagType::named("CircularMid").extends("CircularBase"))
        .unwrap();
    registry
        .register(TagType::named("CircularSub").extends("CircularMid"))
        .unwrap();

    // Pets: inheritance with meta-tag defaults and both alias flavors.
    registry
        .register(
            TagType::named("Animal")
                .accessor(Accessor::new("fluffy").with_default(false))
                .accessor(Accessor::new("name").with_default("")),
        )
        .unwrap();
    registry
        .register(
            TagType::named("Pet")
                .extends("Animal")
                .attach(RawTag::new("Animal").with("fluffy", true))
                .accessor(Accessor::new("name")),
        )
        .unwrap();
    registry
        .register(
            TagType::named("Cat")
                .extends("Pet")
                .accessor(Accessor::new("value").aliased_to("name")),
        )
        .unwrap();
    registry
        .register(
            TagType::named("Dog")
                .extends("Pet")
                .accessor(Accessor::new("name")),
        )
        .unwrap();
    registry
        .register(
            TagType::named("Rat")
                .extends("Animal")
                .accessor(Accessor::new("value").aliased_to_member("Animal", "name")),
        )
        .unwrap();

    // Resource shorthand: a composite standing in for three stacked tags.
    registry.register(TagType::named("Get")).unwrap();
    registry
        .register(TagType::named("Path").accessor(Accessor::new("value")))
        .unwrap();
    registry
        .register(TagType::named("Produces").accessor(Accessor::new("value")))
        .unwrap();
    registry
        .register(
            TagType::named("GetResource")
                .composed_of(["Get", "Path", "Produces"])
                .accessor(Accessor::new("path").aliased_to_member("Path", "value"))
                .accessor(Accessor::new("produces").aliased_to_member("Produces", "value")),
        )
        .unwrap();

    // Component/Router: a composite expanding next to a plain attachment.
    registry.register(TagType::named("Component")).unwrap();
    registry
        .register(TagType::named("Router").accessor(Accessor::new("value").with_default("")))
        .unwrap();
    registry
        .register(TagType::named("Application").composed_of(["Component", "Router"]))
        .unwrap();

    Arc::new(registry)
}

pub fn fixture() -> Fixture {
    let mut provider = InMemoryProvider::new();

    provider.attach(
        "WithRoute",
        RawTag::new("Route")
            .with("method", AttrValue::symbol("POST"))
            .with("path", "test"),
    );
    let gett = provider.attach("WithGet", RawTag::new("Gett").with("path", "get"));
    provider.attach("WithPost", RawTag::new("Post").with("path", "post"));
    provider.attach(
        "WithSocketJS",
        RawTag::new("SocketJS").with("path", "socketjs"),
    );
    provider.attach(
        "WithIntercept",
        RawTag::new("Intercept")
            .with("type", AttrValue::symbol("AFTER_SUCCESS"))
            .with("method", AttrValue::symbol("POST"))
            .with("path", "intercept"),
    );
    provider.attach(
        "WithPreHandler",
        RawTag::new("PreHandler").with("path", "prehandler"),
    );
    provider.attach(
        "WithAfterSuccess",
        RawTag::new("AfterSuccess")
            .with("path", "aftersuccess")
            .with("method", AttrValue::symbol("POST")),
    );

    let get_json = provider.attach(
        "WithGetJson",
        RawTag::new("GetJson")
            .with("path", "test")
            .with("pretty", true),
    );
    provider.attach("WithBaseAndRoute", RawTag::new("BaseAndRoute"));

    provider.attach("WithBase", RawTag::new("Base"));
    provider.attach("WithMid", RawTag::new("Mid"));
    provider.attach("WithSub", RawTag::new("Sub"));
    provider.attach("WithSameBase", RawTag::new("Base"));
    provider.attach("WithSameBase", RawTag::new("Sub"));

    provider.attach("WithCircular", RawTag::new("CircularSub"));

    provider.attach("WithJoint", RawTag::new("Route").with("regex", "jointRegex"));
    provider.attach("WithJoint", RawTag::new("Joint"));
    provider.attach("WithJoint2", RawTag::new("Joint2").with("getPath", "abc"));
    provider.attach(
        "WithJoint2",
        RawTag::new("Route").with("regex", "jointRegex"),
    );

    let cat = provider.attach("MyClass", RawTag::new("Cat").with("value", "Tom"));
    provider.attach("MyClass::foo", RawTag::new("Dog").with("name", "Spike"));
    provider.attach("MyClass::foo", RawTag::new("Rat").with("value", "Jerry"));

    provider.attach(
        "MyResource::bar",
        RawTag::new("GetResource")
            .with("path", "/{id}")
            .with("produces", "application/json"),
    );
    provider.attach_parameter(
        "MyResource::save",
        0,
        RawTag::new("Gett").with("path", "byParam"),
    );

    provider.attach("AppClass", RawTag::new("Router").with("value", "/test"));
    provider.attach("AppClass", RawTag::new("Application"));

    Fixture {
        resolver: TagResolver::new(registry(), provider),
        gett,
        get_json,
        cat,
    }
}
