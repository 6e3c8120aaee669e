use edn_core::api::{parse, to_json};

fn main() {
    let edn_data = r#"
        {:service "notes"
         :port 8080
         :features [:auth :metrics]
         :deployed #inst "2024-11-05T08:30:00Z"}
    "#;

    match parse(edn_data) {
        Ok(Some(value)) => {
            let json_output = to_json(&value).unwrap();
            println!("Successfully read EDN to JSON:\n{json_output}");
        }
        Ok(None) => println!("Input held no value"),
        Err(e) => {
            eprintln!("Failed to read EDN: {e:?}");
        }
    }
}
