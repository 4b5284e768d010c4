#![allow(clippy::unwrap_used, clippy::expect_used)]
use specforge::generator::{generate, generate_all, Artifact, GeneratorInput, Platform};
use specforge::load_document;
use specforge::spec::Document;
use std::fs;
use std::path::{Path, PathBuf};

const SPEC_YAML: &str = r#"
openapi: 3.0.3
info:
  title: User Service
  version: "1.0.0"
x-go-zero:
  service: user-service
  group: user
  middleware:
    - Cors
  jwt:
    enabled: true
x-frontend:
  cache:
    revalidate: 120
x-websocket:
  /ws/updates:
    description: Live updates
    messages:
      - type: userUpdated
    x-mobile:
      background: true
      heartbeat: 20
security:
  - bearerAuth: []
components:
  securitySchemes:
    bearerAuth:
      type: http
      scheme: bearer
  schemas:
    User:
      type: object
      required:
        - id
      properties:
        id:
          type: string
          format: uuid
        name:
          type: string
    CreateUserRequest:
      type: object
      required:
        - name
      properties:
        name:
          type: string
          minLength: 1
          x-go-zero:
            validate: "required,min=1"
        age:
          type: integer
paths:
  /users:
    get:
      operationId: getUsers
      summary: List users
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
      x-frontend:
        swr: true
        revalidate: 30
      x-mobile:
        cacheTime: 120
      responses:
        "200":
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/User'
    post:
      operationId: createUser
      summary: Create a user
      security:
        - bearerAuth: []
      x-go-zero:
        cache:
          ttl: 60
      x-frontend:
        serverAction: true
        invalidatesCache:
          - getUsers
        revalidatePaths:
          - /users
      x-mobile:
        offline: true
        cacheTime: 300
        syncPriority: high
        invalidatesCache:
          - getUsers
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/CreateUserRequest'
      responses:
        "201":
          description: Created
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/User'
  /users/{id}:
    get:
      operationId: getUserById
      summary: Fetch one user
      parameters:
        - name: id
          in: path
          required: true
          schema:
            type: string
      responses:
        "200":
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/User'
"#;

fn template_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

fn fixture_doc() -> Document {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api.yaml");
    fs::write(&path, SPEC_YAML).unwrap();
    load_document(&path).unwrap()
}

fn platform_artifacts(platform: Platform) -> Vec<Artifact> {
    let doc = fixture_doc();
    let (input, issues) = GeneratorInput::from_document(&doc, "api.yaml");
    assert!(issues.is_empty());
    generate(&input, platform, &template_root()).unwrap()
}

fn artifact<'a>(artifacts: &'a [Artifact], rel: &str) -> &'a str {
    &artifacts
        .iter()
        .find(|a| a.rel_path == Path::new(rel))
        .unwrap_or_else(|| panic!("missing artifact {rel}"))
        .content
}

#[test]
fn test_backend_api_file() {
    let artifacts = platform_artifacts(Platform::Backend);
    let api = artifact(&artifacts, "api.api");

    assert!(api.starts_with("syntax = \"v1\"\n"));
    assert!(api.contains("// Code generated from api.yaml. DO NOT EDIT."));
    assert!(api.contains("title:   \"User Service\""));
    assert!(api.contains("version: \"1.0.0\""));

    assert!(api.contains("type User {"));
    assert!(api.contains("\tId string `json:\"id\"`"));
    assert!(api.contains("\tName string `json:\"name\"`"));
    assert!(api.contains("type CreateUserRequest {"));
    assert!(api.contains("\tName string `json:\"name\" validate:\"required,min=1\"`"));
    assert!(api.contains("\tAge int64 `json:\"age\"`"));

    assert!(api.contains("jwt: Auth"));
    assert!(api.contains("group: user"));
    assert!(api.contains("prefix: /api/v1"));
    assert!(api.contains("middleware: Cors"));
    assert!(api.contains("service user-service {"));

    assert!(api.contains("@doc \"List users\""));
    assert!(api.contains("@handler getUsersHandler"));
    assert!(api.contains("\tget /users returns (User)"));
    assert!(api.contains("@handler createUserHandler"));
    assert!(api.contains("\tpost /users (CreateUserRequest) returns (User)"));
    assert!(api.contains("@handler getUserByIdHandler"));
    assert!(api.contains("\tget /users/:id returns (User)"));
}

#[test]
fn test_backend_handlers() {
    let artifacts = platform_artifacts(Platform::Backend);

    let create = artifact(&artifacts, "internal/handler/createuserhandler.go");
    assert!(create.contains("package handler"));
    assert!(create.contains("// createUserHandler handles POST /users"));
    assert!(create.contains("func createUserHandler(svcCtx *svc.ServiceContext) http.HandlerFunc"));
    assert!(create.contains("var req types.CreateUserRequest"));
    assert!(create.contains("httpx.Parse(r, &req)"));
    assert!(create.contains("\"api-service/internal/types\""));
    assert!(create.contains("l := logic.NewCreateUserLogic(r.Context(), svcCtx)"));
    assert!(create.contains("l.CreateUser(&req)"));
    assert!(create.contains("httpx.OkJsonCtx(r.Context(), w, resp)"));

    // no request body means no parse step and no types import
    let list = artifact(&artifacts, "internal/handler/getusershandler.go");
    assert!(list.contains("func getUsersHandler(svcCtx *svc.ServiceContext) http.HandlerFunc"));
    assert!(!list.contains("httpx.Parse"));
    assert!(!list.contains("internal/types"));
    assert!(list.contains("l.GetUsers()"));
}

#[test]
fn test_backend_logic_stubs() {
    let artifacts = platform_artifacts(Platform::Backend);

    let logic = artifact(&artifacts, "internal/logic/createuserlogic.go");
    assert!(logic.contains("package logic"));
    assert!(logic.contains("type CreateUserLogic struct {"));
    assert!(logic.contains(
        "func NewCreateUserLogic(ctx context.Context, svcCtx *svc.ServiceContext) *CreateUserLogic"
    ));
    assert!(logic.contains("// CreateUser Create a user"));
    assert!(logic.contains(
        "func (l *CreateUserLogic) CreateUser(req *types.CreateUserRequest) (resp *types.User, err error) {"
    ));
    assert!(logic.contains("// cached ttl=60"));

    let list = artifact(&artifacts, "internal/logic/getuserslogic.go");
    assert!(list.contains("func (l *GetUsersLogic) GetUsers() (resp *types.User, err error) {"));
    assert!(!list.contains("// cached"));
}

#[test]
fn test_frontend_api_client() {
    let artifacts = platform_artifacts(Platform::Frontend);
    let names: Vec<_> = artifacts
        .iter()
        .map(|a| a.rel_path.to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["api-client.ts", "hooks.ts", "server-actions.ts", "types.ts"]
    );

    let client = artifact(&artifacts, "api-client.ts");
    assert!(client.starts_with("// Code generated from api.yaml. DO NOT EDIT.\n"));
    assert!(client.contains("import { z } from 'zod';"));
    assert!(client.contains("export const UserSchema = z.object({"));
    assert!(client.contains("  id: z.string().uuid(),"));
    assert!(client.contains("  name: z.string().optional(),"));
    assert!(client.contains("export const CreateUserRequestSchema = z.object({"));
    assert!(client.contains("  name: z.string().min(1),"));
    assert!(client.contains("  age: z.number().int().optional(),"));

    assert!(client.contains("/** List users */"));
    assert!(client.contains("async getUsers(params: { limit?: number }): Promise<Types.User> {"));
    assert!(client.contains("return this.request('GET', `/users`);"));

    // body validated through zod before the request goes out
    assert!(client.contains("async createUser(data: Types.CreateUserRequest): Promise<Types.User> {"));
    assert!(client.contains("const payload = CreateUserRequestSchema.parse(data);"));
    assert!(client.contains("return this.request('POST', `/users`, payload);"));

    assert!(client.contains("async getUserById(params: { id: string }): Promise<Types.User> {"));
    assert!(client.contains("return this.request('GET', `/users/${params.id}`);"));

    assert!(client.contains("export const apiClient = new ApiClient();"));
}

#[test]
fn test_frontend_hooks() {
    let artifacts = platform_artifacts(Platform::Frontend);
    let hooks = artifact(&artifacts, "hooks.ts");

    assert!(hooks.contains("'use client';"));
    assert!(hooks.contains(
        "export function useGetUsers(params: { limit?: number }, config?: SWRConfiguration)"
    ));
    assert!(hooks.contains("['getUsers', params]"));
    assert!(hooks.contains("() => apiClient.getUsers(params)"));
    assert!(hooks.contains("revalidateOnFocus: true,"));
    assert!(hooks.contains("revalidateOnReconnect: true,"));
    assert!(hooks.contains("refreshInterval: 30000,"));

    // mutations invalidate the caches they were configured with
    assert!(hooks.contains("export function useCreateUser() {"));
    assert!(hooks.contains("const result = await apiClient.createUser(data);"));
    assert!(hooks.contains("await mutate('getUsers');"));

    // getUserById opted into neither swr nor mutations
    assert!(!hooks.contains("useGetUserById"));
}

#[test]
fn test_frontend_server_actions() {
    let artifacts = platform_artifacts(Platform::Frontend);
    let actions = artifact(&artifacts, "server-actions.ts");

    assert!(actions.contains("'use server';"));
    assert!(actions.contains("export const defaultRevalidate = 120;"));
    assert!(actions.contains("export async function createUserAction(formData: FormData) {"));
    assert!(actions.contains("    name: formData.get('name') as unknown as string,"));
    assert!(actions.contains("    age: formData.get('age') as unknown as number,"));
    assert!(actions.contains("  } as Types.CreateUserRequest;"));
    assert!(actions.contains("const result = await apiClient.createUser(data);"));
    assert!(actions.contains("revalidatePath('/users');"));
    assert!(actions.contains("return result;"));

    // only opted-in operations become actions
    assert!(!actions.contains("getUsersAction"));
    assert!(!actions.contains("getUserByIdAction"));
}

#[test]
fn test_frontend_types_file() {
    let artifacts = platform_artifacts(Platform::Frontend);
    let types = artifact(&artifacts, "types.ts");

    assert!(types.starts_with("// Auto-generated TypeScript types\n\n"));
    assert!(types.contains("export interface User {\n  id: string;\n  name?: string;\n}\n"));
    assert!(types.contains("export interface CreateUserRequest {\n  name: string;\n  age?: number;\n}\n"));
}

#[test]
fn test_mobile_api_service() {
    let artifacts = platform_artifacts(Platform::Mobile);
    let service = artifact(&artifacts, "api-service.ts");

    assert!(service
        .contains("import AsyncStorage from '@react-native-async-storage/async-storage';"));
    assert!(service.contains("import { offlineSyncManager } from './offline-sync';"));
    assert!(service.contains("import { WebSocketClient } from './websocket-client';"));

    assert!(service.contains("export const WS_CHANNELS = {"));
    assert!(service.contains("  // Live updates"));
    assert!(service.contains(
        "  '/ws/updates': { background: true, reconnect: true, heartbeat: 20, messages: ['userUpdated'] },"
    ));
    assert!(service.contains("openSocket(path: keyof typeof WS_CHANNELS): WebSocketClient {"));

    // GET with a cacheTime reads through the AsyncStorage cache
    assert!(service.contains("async getUsers(params: { limit?: number }): Promise<Types.User> {"));
    assert!(service
        .contains("return this.cached(`cache:getUsers:${JSON.stringify(params)}`, 120, () =>"));

    // offline mutation goes through the sync queue with its priority
    assert!(service.contains("async createUser(data: Types.CreateUserRequest): Promise<Types.User> {"));
    assert!(service.contains("return this.queued('POST', `/users`, 'high', data);"));

    // no mobile config at all falls back to a plain request
    assert!(service.contains("async getUserById(params: { id: string }): Promise<Types.User> {"));
    assert!(service.contains("return this.request('GET', `/users/${params.id}`);"));

    assert!(service.contains("export const apiService = new ApiService();"));
}

#[test]
fn test_mobile_hooks_and_support_files() {
    let artifacts = platform_artifacts(Platform::Mobile);

    let hooks = artifact(&artifacts, "hooks.ts");
    assert!(hooks.contains("export function useGetUsers(params: { limit?: number }) {"));
    assert!(hooks.contains(".getUsers(params)"));
    assert!(hooks.contains("return { data, error, loading, refresh };"));
    assert!(hooks.contains("export function useCreateUser() {"));
    assert!(hooks.contains("await apiService.invalidate('getUsers');"));
    assert!(hooks.contains("return { run, submitting, error };"));

    let types = artifact(&artifacts, "types.ts");
    assert!(types.starts_with("// Auto-generated TypeScript types for Expo\n\n"));

    // support files ship as-is
    let sync = artifact(&artifacts, "offline-sync.ts");
    let shipped = fs::read_to_string(template_root().join("expo/offline-sync.tpl")).unwrap();
    assert_eq!(sync, shipped);

    let ws = artifact(&artifacts, "websocket-client.ts");
    let shipped_ws = fs::read_to_string(template_root().join("expo/websocket-client.tpl")).unwrap();
    assert_eq!(ws, shipped_ws);
}

#[test]
fn test_mobile_websocket_client_only_when_configured() {
    let mut root: serde_json::Value = serde_yaml::from_str(SPEC_YAML).unwrap();
    root.as_object_mut().unwrap().remove("x-websocket");
    let doc = Document::from_value(root);

    let (input, _) = GeneratorInput::from_document(&doc, "api.yaml");
    let artifacts = generate(&input, Platform::Mobile, &template_root()).unwrap();
    let names: Vec<_> = artifacts
        .iter()
        .map(|a| a.rel_path.to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["api-service.ts", "hooks.ts", "offline-sync.ts", "types.ts"]
    );
    assert!(!artifact(&artifacts, "api-service.ts").contains("WS_CHANNELS"));
    assert!(!artifact(&artifacts, "api-service.ts").contains("websocket-client"));
}

#[test]
fn test_generate_all_single_platform_writes_flat() {
    let doc = fixture_doc();
    let (input, _) = GeneratorInput::from_document(&doc, "api.yaml");
    let out = tempfile::tempdir().unwrap();

    generate_all(&input, &[Platform::Frontend], &template_root(), out.path()).unwrap();

    assert!(out.path().join("api-client.ts").exists());
    assert!(out.path().join("types.ts").exists());
    assert!(!out.path().join("frontend").exists());
}

#[test]
fn test_generate_all_multi_platform_writes_subdirs() {
    let doc = fixture_doc();
    let (input, _) = GeneratorInput::from_document(&doc, "api.yaml");
    let out = tempfile::tempdir().unwrap();

    generate_all(
        &input,
        &[Platform::Backend, Platform::Frontend, Platform::Mobile],
        &template_root(),
        out.path(),
    )
    .unwrap();

    assert!(out.path().join("backend/api.api").exists());
    assert!(out
        .path()
        .join("backend/internal/handler/createuserhandler.go")
        .exists());
    assert!(out
        .path()
        .join("backend/internal/logic/createuserlogic.go")
        .exists());
    assert!(out.path().join("frontend/api-client.ts").exists());
    assert!(out.path().join("frontend/server-actions.ts").exists());
    assert!(out.path().join("mobile/api-service.ts").exists());
    assert!(out.path().join("mobile/websocket-client.ts").exists());
}

#[test]
fn test_generation_is_deterministic() {
    let doc = fixture_doc();
    let (input, _) = GeneratorInput::from_document(&doc, "api.yaml");

    for platform in [Platform::Backend, Platform::Frontend, Platform::Mobile] {
        let first = generate(&input, platform, &template_root()).unwrap();
        let second = generate(&input, platform, &template_root()).unwrap();
        assert_eq!(first, second);
    }
}
