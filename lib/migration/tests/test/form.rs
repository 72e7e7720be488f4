use crate::fixtures::{ColumnType, get_schema};

#[tokio::test]
async fn test_db_schema_form() {
    let schema = get_schema().await;

    let form = schema
        .table("form")
        .columns(&["id", "title", "description", "owner_id"]);
    form.column("id")
        .r#type(ColumnType::String(None))
        .nullable(false)
        .default(None)
        .primary_key();
    form.column("title")
        .r#type(ColumnType::String(None))
        .nullable(false);
    form.column("description")
        .r#type(ColumnType::String(None))
        .nullable(true);
    form.column("owner_id")
        .r#type(ColumnType::String(None))
        .nullable(false)
        .foreign_key("fk-Form-OwnerId", "user", "id");
}

#[tokio::test]
async fn test_db_schema_form_field() {
    let schema = get_schema().await;

    let form_field = schema.table("formfield").columns(&[
        "id",
        "form_id",
        "label",
        "description",
        "field_type",
        "required",
        "possible_answers",
        "number_bounds",
        "text_bounds",
        "position",
    ]);
    form_field
        .column("id")
        .r#type(ColumnType::String(None))
        .nullable(false)
        .primary_key();
    form_field
        .column("form_id")
        .r#type(ColumnType::String(None))
        .nullable(false)
        .foreign_key("fk-FormField-FormId", "form", "id");
    form_field
        .column("field_type")
        .r#type(ColumnType::String(None))
        .nullable(false);
    form_field
        .column("required")
        .r#type(ColumnType::Boolean)
        .nullable(false)
        .default(None);
    for column in ["possible_answers", "number_bounds", "text_bounds"] {
        form_field
            .column(column)
            .r#type(ColumnType::String(None))
            .nullable(true);
    }
    form_field
        .column("position")
        .r#type(ColumnType::Integer)
        .nullable(true)
        .default(None);
}
