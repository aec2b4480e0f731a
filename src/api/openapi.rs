use serde_json::{json, Value};

use crate::routes::CONNECTIONS_PATH;

/// OpenAPI 3 description of the connection endpoints, served at /openapi.json
pub fn openapi_document() -> Value {
    let record_path = format!("{}/{{organization_datasource_id}}", CONNECTIONS_PATH);
    let id_param = json!({
        "name": "organization_datasource_id",
        "in": "path",
        "required": true,
        "description": "ID of the connection",
        "schema": { "type": "string" }
    });
    let error_response = |description: &str| {
        json!({
            "description": description,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
        })
    };
    let connection_response = json!({
        "description": "Connection",
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Connection" } } }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Organization Datasource Connections",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            CONNECTIONS_PATH: {
                "get": {
                    "summary": "List all organisation datasource connections",
                    "operationId": "get_connections",
                    "responses": {
                        "200": {
                            "description": "All connections in stored order",
                            "content": { "application/json": { "schema": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Connection" }
                            } } }
                        }
                    }
                }
            },
            record_path: {
                "get": {
                    "summary": "Get a single connection by ID",
                    "operationId": "get_connection_by_id",
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": connection_response.clone(),
                        "404": error_response("Connection not found")
                    }
                },
                "patch": {
                    "summary": "Update last_sync_at for a connection",
                    "operationId": "patch_connection",
                    "parameters": [id_param],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": {
                            "$ref": "#/components/schemas/PatchConnectionRequest"
                        } } }
                    },
                    "responses": {
                        "200": connection_response,
                        "400": error_response("Malformed body or timestamp"),
                        "404": error_response("Connection not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Credentials": {
                    "type": "object",
                    "required": ["AppName", "AppSecret", "AppKey", "BaseURL"],
                    "properties": {
                        "AppName": { "type": "string" },
                        "AppSecret": { "type": "string" },
                        "AppKey": { "type": "string" },
                        "BaseURL": { "type": "string" }
                    }
                },
                "FoundryConfig": {
                    "type": "object",
                    "required": ["profiles_dataset_rid", "visits_dataset_rid"],
                    "properties": {
                        "profiles_dataset_rid": { "type": "string" },
                        "visits_dataset_rid": { "type": "string" }
                    }
                },
                "Connection": {
                    "type": "object",
                    "required": ["id", "organization_id", "provider", "status", "credentials", "foundryConfig", "last_sync_at"],
                    "properties": {
                        "id": { "type": "string" },
                        "organization_id": { "type": "string" },
                        "provider": { "type": "string", "enum": ["foundry"] },
                        "status": { "type": "string", "enum": ["active", "inactive", "error"] },
                        "credentials": { "$ref": "#/components/schemas/Credentials" },
                        "foundryConfig": { "$ref": "#/components/schemas/FoundryConfig" },
                        "last_sync_at": { "type": "string", "format": "date-time", "nullable": true }
                    }
                },
                "PatchConnectionRequest": {
                    "type": "object",
                    "required": ["last_sync_at"],
                    "properties": {
                        "last_sync_at": {
                            "type": "string",
                            "format": "date-time",
                            "description": "ISO-8601 timestamp of the most recent sync."
                        }
                    }
                },
                "Error": {
                    "type": "object",
                    "required": ["error", "message", "code"],
                    "properties": {
                        "error": { "type": "boolean" },
                        "message": { "type": "string" },
                        "code": { "type": "string" },
                        "field_errors": {
                            "type": "object",
                            "additionalProperties": { "type": "string" }
                        }
                    }
                }
            }
        }
    })
}
