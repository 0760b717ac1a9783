use crate::context::{Code, Place, Scope, byte_literal};

#[test]
fn scope_names_are_sequential() {
    let mut scope = Scope::default();
    assert_eq!(scope.fresh(), "zb0001");
    assert_eq!(scope.fresh(), "zb0002");
    assert_eq!(Scope::default().fresh(), "zb0001");
}

#[test]
fn owned_place() {
    let place = Place::owned("self.name");
    assert_eq!(place.expr(), "self.name");
    assert_eq!(place.by_ref(), "&self.name");
    assert_eq!(place.by_mut(), "&mut self.name");
    assert_eq!(place.by_val(), "self.name");
}

#[test]
fn binding_place() {
    let place = Place::binding("zb0001");
    assert_eq!(place.by_ref(), "zb0001");
    assert_eq!(place.by_mut(), "zb0001");
    assert_eq!(place.by_val(), "*zb0001");
    assert_eq!(place.field("type").by_ref(), "&zb0001.r#type");
    assert_eq!(place.index("zb0002").by_val(), "zb0001[zb0002]");
}

#[test]
fn byte_literals() {
    assert_eq!(byte_literal(b","), "b','");
    assert_eq!(byte_literal(b"\""), "b'\\\"'");
    assert_eq!(byte_literal(b"{\"a\":"), r#"b"{\"a\":""#);
    assert_eq!(byte_literal(b"null"), r#"b"null""#);
}

#[test]
fn code_indentation() {
    let mut code = Code::new(1);
    code.open("if x {");
    code.line("a();");
    code.middle("} else {");
    code.line("b();");
    code.close("}");
    assert_eq!(
        code.finish(),
        "    if x {\n        a();\n    } else {\n        b();\n    }\n"
    );
}
