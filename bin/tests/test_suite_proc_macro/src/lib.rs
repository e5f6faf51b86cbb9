use quote::{format_ident, quote};

/// Generates one `#[test]` per `.gox` file found next to the test suite.
#[proc_macro]
pub fn generate_tests(_: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let root_dir = format!("{}/..", env!("CARGO_MANIFEST_DIR"));
    let mut paths = walkdir::WalkDir::new(root_dir.clone())
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension() == Some("gox".as_ref()))
        .map(|entry| entry.into_path())
        .collect::<Vec<_>>();
    paths.sort();

    let tests = paths.iter().map(|path| {
        let test_file_path = path.to_string_lossy();
        let relative_test_path = path.strip_prefix(&root_dir).unwrap().to_string_lossy();
        let test_ident = format_ident!(
            "test_{}",
            relative_test_path.replace(".gox", "").replace(['/', '\\', '-'], "_")
        );
        quote! {
            #[test]
            fn #test_ident() {
                gox_expect(std::fs::read_to_string(#test_file_path).unwrap().as_str());
            }
        }
    });

    quote! {
        #[ctor::ctor]
        fn init() {
            env_logger::init();
        }

        #(#tests)*
    }
    .into()
}
