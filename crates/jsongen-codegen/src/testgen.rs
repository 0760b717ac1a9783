//! Round-trip test emitter.
//!
//! One `#[test]` per type: encode `T::default()`, check the output is a
//! single well-formed JSON value within the size bound, decode it and
//! re-encode it to the same bytes.

use jsongen_core::utils::to_snake_case;

use crate::context::Code;

/// Name of the module the rendered tests are wrapped in.
pub(crate) const TEST_MODULE: &str = "jsongen_round_trip";

/// A test function for `type_name`, indented for the test module.
pub(crate) fn emit_test(type_name: &str, runtime: &str) -> String {
    let rt = runtime;
    let mut code = Code::new(1);
    code.line("#[test]");
    code.open(format!(
        "fn {}_json_round_trip() {{",
        to_snake_case(type_name)
    ));
    code.line(format!("let value = <{type_name} as Default>::default();"));
    code.line(format!(
        "let encoded = {rt}::to_vec(&value).expect(\"encode default value\");"
    ));
    code.line(format!("let mut lexer = {rt}::Lexer::new(&encoded);"));
    code.line("lexer.skip_recursive();");
    code.line("lexer.consumed();");
    code.open("assert!(");
    code.line("lexer.ok(),");
    code.line("\"malformed JSON: {}\",");
    code.line("String::from_utf8_lossy(&encoded)");
    code.close(");");
    code.open("assert!(");
    code.line(format!("{rt}::SizeJson::size_json(&value) >= encoded.len(),"));
    code.line("\"size_json() is below the encoded length of {}\",");
    code.line("String::from_utf8_lossy(&encoded)");
    code.close(");");
    code.line(format!(
        "let decoded: {type_name} = {rt}::from_slice(&encoded).expect(\"decode default value\");"
    ));
    code.line(format!(
        "let again = {rt}::to_vec(&decoded).expect(\"re-encode decoded value\");"
    ));
    code.line("assert_eq!(again, encoded);");
    code.close("}");
    code.finish()
}
