mod ast;
mod codegen;
mod error;
mod runtime;
mod tokenizer;

fn main() {
    let source = "Hello {{name}}!\n{{#users}}- {{name}}\n{{/users}}";
    println!("Compiling: {}", source);

    let tokens = match tokenizer::tokenize(source) {
        Ok(tokens) => tokens,
        Err(e) => {
            error::display_tokenize_error(source, "<input>", &e);
            return;
        }
    };

    let compiler = codegen::Compiler::new();
    match compiler.compile(&tokens) {
        Ok(js) => {
            println!("Successfully generated JavaScript:");
            println!("{}", js);
        }
        Err(e) => {
            error::display_codegen_error(source, "<input>", &e);
        }
    }
}
