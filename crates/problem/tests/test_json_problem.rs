use helios_problem::{
    JsonOptions, Payload, ProblemError, ProblemFields, Result, from_json_str, media_type_for,
    to_json_string,
};
use serde_json::{Value, json};

fn out_of_credit() -> Result<Payload> {
    ProblemFields::new()
        .with_type("https://test.io/problem_details/out_of_credit")
        .with_title("You do not have enough credit.")
        .with_status(403u16)
        .with_detail("Your current balance is 30, but that costs 50.")
        .with_instance("/accounts/1")
        .with_extension("balance", 30)
        .with_extension("accounts", json!(["/accounts/1", "/accounts/10"]))
        .build()
}

#[test]
fn test_json_serialize_default_payload() -> Result<()> {
    assert_eq!(
        to_json_string(&Payload::default())?,
        r#"{"type":"about:blank"}"#
    );
    Ok(())
}

#[test]
fn test_json_serialize_compact() -> Result<()> {
    let json = out_of_credit()?.to_json(&JsonOptions::compact())?;
    assert_eq!(
        json,
        concat!(
            r#"{"type":"https://test.io/problem_details/out_of_credit","#,
            r#""title":"You do not have enough credit.","status":403,"#,
            r#""detail":"Your current balance is 30, but that costs 50.","#,
            r#""instance":"/accounts/1","#,
            r#""extensions":{"balance":30,"accounts":["/accounts/1","/accounts/10"]}}"#
        )
    );
    Ok(())
}

#[test]
fn test_json_serialize_pretty() -> Result<()> {
    let json = out_of_credit()?.to_json(&JsonOptions::pretty())?;
    let expected = r#"{
  "type": "https://test.io/problem_details/out_of_credit",
  "title": "You do not have enough credit.",
  "status": 403,
  "detail": "Your current balance is 30, but that costs 50.",
  "instance": "/accounts/1",
  "extensions": {
    "balance": 30,
    "accounts": [
      "/accounts/1",
      "/accounts/10"
    ]
  }
}"#;
    assert_eq!(json, expected);
    Ok(())
}

#[test]
fn test_json_deserialize_flat_extensions() -> Result<()> {
    let payload = from_json_str(
        r#"{
          "type": "https://test.io/problem_details/out_of_credit",
          "title": "You do not have enough credit.",
          "status": 403,
          "detail": "Your current balance is 30, but that costs 50.",
          "instance": "/accounts/1",
          "balance": 30,
          "accounts": ["/accounts/1", "/accounts/10"]
        }"#,
    )?;
    assert_eq!(payload, out_of_credit()?);
    Ok(())
}

#[test]
fn test_json_deserialize_nested_extensions() -> Result<()> {
    let payload = from_json_str(
        r#"{
          "type": "https://test.io/problem_details/out_of_credit",
          "title": "You do not have enough credit.",
          "status": 403,
          "detail": "Your current balance is 30, but that costs 50.",
          "instance": "/accounts/1",
          "extensions": {"balance": 30, "accounts": ["/accounts/1", "/accounts/10"]}
        }"#,
    )?;
    assert_eq!(payload, out_of_credit()?);
    Ok(())
}

#[test]
fn test_json_derives_title_from_status() -> Result<()> {
    let payload = from_json_str(
        r#"{"type":"https://x/y","status":403,"detail":"d","balance":30,"accounts":["/a","/b"]}"#,
    )?;
    assert_eq!(payload.status(), Some(403));
    assert_eq!(payload.title(), Some("Forbidden"));
    assert_eq!(
        Value::Object(payload.extensions().clone()),
        json!({"balance": 30, "accounts": ["/a", "/b"]})
    );
    Ok(())
}

#[test]
fn test_json_round_trip_keeps_extension_order() -> Result<()> {
    let mut payload = ProblemFields::new().with_status("bad_request").build()?;
    payload
        .add_extension("zeta", 1)
        .add_extension("alpha", "a")
        .add_extension("mid", json!([true, null]));

    let decoded = Payload::from_json(&payload.to_json(&JsonOptions::compact())?)?;
    assert_eq!(decoded, payload);
    let keys: Vec<&str> = decoded.extensions().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    Ok(())
}

#[test]
fn test_json_errors() {
    assert!(matches!(from_json_str("not json"), Err(ProblemError::Json(_))));
    assert!(matches!(
        from_json_str(r#"["type"]"#),
        Err(ProblemError::Shape { expected: "a JSON object", found: "array" })
    ));
    assert!(matches!(
        from_json_str(r#"{"status": "teapot"}"#),
        Err(ProblemError::StatusResolution(_))
    ));
}

#[test]
fn test_payload_embeds_in_serde_documents() -> Result<()> {
    let envelope = json!({"error": out_of_credit()?});
    assert_eq!(envelope["error"]["status"], json!(403));
    assert_eq!(envelope["error"]["extensions"]["balance"], json!(30));

    let error: Payload = serde_json::from_value(envelope["error"].clone())?;
    assert_eq!(error, out_of_credit()?);
    Ok(())
}

#[test]
fn test_media_types() {
    assert_eq!(media_type_for(Some("json")), "application/problem+json");
    assert_eq!(media_type_for(Some("xml")), "application/problem+xml");
    assert_eq!(media_type_for(Some("bogus")), "");
    assert_eq!(media_type_for(None), "");
}
