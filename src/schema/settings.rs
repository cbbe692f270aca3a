//! The Django settings graph.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::{Field, Record, TupleShape, Type};
use crate::value::Value;

/// Template backends shipped with Django.
pub const TEMPLATE_BACKENDS: &[&str] = &[
    "django.template.backends.django.DjangoTemplates",
    "django.template.backends.jinja2.Jinja2",
];

/// Task backends shipped with Django.
pub const TASK_BACKENDS: &[&str] = &[
    "django.tasks.backends.immediate.ImmediateBackend",
    "django.tasks.backends.dummy.DummyBackend",
];

/// Cache backends shipped with Django.
pub const CACHE_BACKENDS: &[&str] = &[
    "django.core.cache.backends.db.DatabaseCache",
    "django.core.cache.backends.dummy.DummyCache",
    "django.core.cache.backends.filebased.FileBasedCache",
    "django.core.cache.backends.locmem.LocMemCache",
    "django.core.cache.backends.memcached.PyMemcacheCache",
    "django.core.cache.backends.memcached.PyLibMCCache",
    "django.core.cache.backends.redis.RedisCache",
];

/// Database engines shipped with Django.
pub const DATABASE_ENGINES: &[&str] = &[
    "django.db.backends.postgresql",
    "django.db.backends.mysql",
    "django.db.backends.sqlite3",
    "django.db.backends.oracle",
];

/// Password validators shipped with Django.
pub const AUTH_PASSWORD_VALIDATORS: &[&str] = &[
    "django.contrib.auth.password_validation.UserAttributeSimilarityValidator",
    "django.contrib.auth.password_validation.MinimumLengthValidator",
    "django.contrib.auth.password_validation.CommonPasswordValidator",
    "django.contrib.auth.password_validation.NumericPasswordValidator",
];

const LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("ar", "Arabic"),
    ("ar-dz", "Algerian Arabic"),
    ("ast", "Asturian"),
    ("az", "Azerbaijani"),
    ("bg", "Bulgarian"),
    ("be", "Belarusian"),
    ("bn", "Bengali"),
    ("br", "Breton"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("ckb", "Central Kurdish (Sorani)"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("dsb", "Lower Sorbian"),
    ("el", "Greek"),
    ("en", "English"),
    ("en-au", "Australian English"),
    ("en-gb", "British English"),
    ("eo", "Esperanto"),
    ("es", "Spanish"),
    ("es-ar", "Argentinian Spanish"),
    ("es-co", "Colombian Spanish"),
    ("es-mx", "Mexican Spanish"),
    ("es-ni", "Nicaraguan Spanish"),
    ("es-ve", "Venezuelan Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("fy", "Frisian"),
    ("ga", "Irish"),
    ("gd", "Scottish Gaelic"),
    ("gl", "Galician"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hsb", "Upper Sorbian"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("ia", "Interlingua"),
    ("id", "Indonesian"),
    ("ig", "Igbo"),
    ("io", "Ido"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ka", "Georgian"),
    ("kab", "Kabyle"),
    ("kk", "Kazakh"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("ky", "Kyrgyz"),
    ("lb", "Luxembourgish"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("ml", "Malayalam"),
    ("mn", "Mongolian"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("my", "Burmese"),
    ("nb", "Norwegian Bokmål"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("nn", "Norwegian Nynorsk"),
    ("os", "Ossetic"),
    ("pa", "Punjabi"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pt-br", "Brazilian Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("sr-latn", "Serbian Latin"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("tg", "Tajik"),
    ("th", "Thai"),
    ("tk", "Turkmen"),
    ("tr", "Turkish"),
    ("tt", "Tatar"),
    ("udm", "Udmurt"),
    ("ug", "Uyghur"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("uz", "Uzbek"),
    ("vi", "Vietnamese"),
    ("zh-hans", "Simplified Chinese"),
    ("zh-hant", "Traditional Chinese"),
];

const LANGUAGES_BIDI: &[&str] = &["he", "ar", "ar-dz", "ckb", "fa", "ug", "ur"];

const PASSWORD_HASHERS: &[&str] = &[
    "django.contrib.auth.hashers.PBKDF2PasswordHasher",
    "django.contrib.auth.hashers.PBKDF2SHA1PasswordHasher",
    "django.contrib.auth.hashers.Argon2PasswordHasher",
    "django.contrib.auth.hashers.BCryptSHA256PasswordHasher",
    "django.contrib.auth.hashers.ScryptPasswordHasher",
];

const FILE_UPLOAD_HANDLERS: &[&str] = &[
    "django.core.files.uploadhandler.MemoryFileUploadHandler",
    "django.core.files.uploadhandler.TemporaryFileUploadHandler",
];

const STATICFILES_FINDERS: &[&str] = &[
    "django.contrib.staticfiles.finders.FileSystemFinder",
    "django.contrib.staticfiles.finders.AppDirectoriesFinder",
];

fn backend_name(known: &'static [&'static str]) -> Type {
    Type::union(vec![Type::Literal(known), Type::Str])
}

fn str_or_path() -> Type {
    Type::union(vec![Type::Str, Type::Path])
}

// Untyped `list | tuple`, the inferred type of a sequence default.
fn any_sequence() -> Type {
    Type::union(vec![Type::List(None), Type::Tuple(TupleShape::Untyped)])
}

fn any_tuple_or_list() -> Type {
    Type::union(vec![Type::Tuple(TupleShape::Untyped), Type::List(None)])
}

fn people() -> Type {
    let pair = Type::fixed_tuple(vec![Type::Str, Type::Str]);
    Type::union(vec![Type::list_of(pair.clone()), Type::tuple_of(pair)])
}

fn empty_list() -> Value {
    Value::List(Vec::new())
}

fn empty_dict() -> Value {
    Value::Table(BTreeMap::new())
}

fn strings(items: &[&str]) -> Value {
    Value::List(items.iter().map(|s| Value::from(*s)).collect())
}

fn nullable(name: &'static str, ty: Type) -> Field {
    Field::with_default(name, Type::optional(ty), Value::Null)
}

fn unknown(name: &'static str) -> Field {
    nullable(name, Type::Any)
}

fn flag(name: &'static str, default: bool) -> Field {
    Field::with_default(name, Type::Bool, default)
}

fn int(name: &'static str, default: i64) -> Field {
    Field::with_default(name, Type::Int, default)
}

fn text(name: &'static str, default: &str) -> Field {
    Field::with_default(name, Type::Str, default)
}

fn sequence(name: &'static str) -> Field {
    Field::with_factory(name, any_sequence(), empty_list)
}

/// `TEMPLATES` entries.
pub static TEMPLATE: LazyLock<Record> = LazyLock::new(|| {
    Record::new(
        "TemplateSchema",
        vec![
            Field::required("BACKEND", backend_name(TEMPLATE_BACKENDS)),
            Field::with_factory("DIRS", Type::list_of(str_or_path()), empty_list),
            flag("APP_DIRS", false),
            Field::with_factory("OPTIONS", Type::Dict(None), empty_dict),
            nullable("NAME", Type::Str),
        ],
    )
});

/// `DATABASES` entries.
pub static DATABASE: LazyLock<Record> = LazyLock::new(|| {
    Record::new(
        "DatabaseSchema",
        vec![
            Field::required("ENGINE", backend_name(DATABASE_ENGINES)),
            Field::required("NAME", str_or_path()),
            nullable("USER", Type::Str),
            nullable("PASSWORD", Type::Str),
            nullable("HOST", Type::Str),
            nullable("PORT", Type::union(vec![Type::Str, Type::Int])),
            flag("ATOMIC_REQUESTS", false),
            flag("AUTOCOMMIT", true),
            Field::with_default("CONN_MAX_AGE", Type::optional(Type::Int), 0),
            flag("CONN_HEALTH_CHECKS", false),
            Field::with_factory("OPTIONS", Type::Dict(None), empty_dict),
            nullable("TIME_ZONE", Type::Str),
            Field::with_factory("TEST", Type::Dict(None), empty_dict),
        ],
    )
});

/// `CACHES` entries.
pub static CACHE: LazyLock<Record> = LazyLock::new(|| {
    Record::new(
        "CacheSchema",
        vec![
            Field::required("BACKEND", backend_name(CACHE_BACKENDS)),
            nullable(
                "LOCATION",
                Type::union(vec![Type::Str, Type::list_of(Type::Str)]),
            ),
            nullable("TIMEOUT", Type::Int),
            Field::with_factory("OPTIONS", Type::Dict(None), empty_dict),
            nullable("KEY_PREFIX", Type::Str),
            nullable("KEY_FUNCTION", Type::Str),
            nullable("VERSION", Type::Int),
        ],
    )
});

/// `AUTH_PASSWORD_VALIDATORS` entries.
pub static AUTH_PASSWORD_VALIDATOR: LazyLock<Record> = LazyLock::new(|| {
    Record::new(
        "AuthPasswordValidatorSchema",
        vec![
            Field::required("NAME", backend_name(AUTH_PASSWORD_VALIDATORS)),
            Field::with_factory("OPTIONS", Type::Dict(None), empty_dict),
        ],
    )
});

/// `TASKS` entries.
pub static TASK: LazyLock<Record> = LazyLock::new(|| {
    Record::new(
        "TaskSchema",
        vec![
            Field::required("BACKEND", backend_name(TASK_BACKENDS)),
            Field::with_factory("QUEUES", Type::sequence_of(Type::Str), || {
                strings(&["default"])
            }),
            Field::with_factory("OPTIONS", Type::Dict(None), empty_dict),
        ],
    )
});

/// Django's global settings, the root of the graph.
pub static SETTINGS: LazyLock<Record> = LazyLock::new(|| {
    let str_map = || Type::dict_of(Type::Str, Type::Any);

    Record::new(
        "SettingsSchema",
        vec![
            // Core
            flag("DEBUG", false),
            flag("DEBUG_PROPAGATE_EXCEPTIONS", false),
            Field::with_factory("ADMINS", people(), empty_list),
            Field::with_factory("MANAGERS", people(), empty_list),
            sequence("INTERNAL_IPS"),
            sequence("ALLOWED_HOSTS"),
            text("TIME_ZONE", "America/Chicago"),
            flag("USE_TZ", true),
            text("LANGUAGE_CODE", "en-us"),
            Field::with_factory("LANGUAGES", any_sequence(), || {
                Value::List(
                    LANGUAGES
                        .iter()
                        .map(|(code, name)| {
                            Value::Tuple(vec![Value::from(*code), Value::from(*name)])
                        })
                        .collect(),
                )
            }),
            Field::with_factory("LANGUAGES_BIDI", any_sequence(), || {
                strings(LANGUAGES_BIDI)
            }),
            flag("USE_I18N", true),
            Field::with_factory(
                "LOCALE_PATHS",
                Type::sequence_of(str_or_path()),
                empty_list,
            ),
            text("LANGUAGE_COOKIE_NAME", "django_language"),
            nullable("LANGUAGE_COOKIE_AGE", Type::Int),
            nullable("LANGUAGE_COOKIE_DOMAIN", Type::Str),
            text("LANGUAGE_COOKIE_PATH", "/"),
            flag("LANGUAGE_COOKIE_SECURE", false),
            flag("LANGUAGE_COOKIE_HTTPONLY", false),
            nullable("LANGUAGE_COOKIE_SAMESITE", Type::Str),
            text("DEFAULT_CHARSET", "utf-8"),
            text("SERVER_EMAIL", "root@localhost"),
            Field::with_factory(
                "DATABASES",
                Type::dict_of(Type::Str, Type::Record(&DATABASE)),
                empty_dict,
            ),
            sequence("DATABASE_ROUTERS"),
            // Email
            text(
                "EMAIL_BACKEND",
                "django.core.mail.backends.smtp.EmailBackend",
            ),
            text("EMAIL_HOST", "localhost"),
            int("EMAIL_PORT", 25),
            flag("EMAIL_USE_LOCALTIME", false),
            text("EMAIL_HOST_USER", ""),
            text("EMAIL_HOST_PASSWORD", ""),
            flag("EMAIL_USE_TLS", false),
            flag("EMAIL_USE_SSL", false),
            nullable("EMAIL_SSL_CERTFILE", Type::Str),
            nullable("EMAIL_SSL_KEYFILE", Type::Str),
            nullable("EMAIL_TIMEOUT", Type::Int),
            text("DEFAULT_FROM_EMAIL", "webmaster@localhost"),
            text("EMAIL_SUBJECT_PREFIX", "[Django] "),
            // Applications and templates
            Field::with_factory(
                "INSTALLED_APPS",
                Type::sequence_of(Type::Str),
                empty_list,
            ),
            Field::with_factory(
                "TEMPLATES",
                Type::sequence_of(Type::Record(&TEMPLATE)),
                empty_list,
            ),
            text("FORM_RENDERER", "django.forms.renderers.DjangoTemplates"),
            flag("APPEND_SLASH", true),
            flag("PREPEND_WWW", false),
            nullable("FORCE_SCRIPT_NAME", Type::Str),
            sequence("DISALLOWED_USER_AGENTS"),
            sequence("IGNORABLE_404_URLS"),
            Field::required("SECRET_KEY", Type::Str),
            sequence("SECRET_KEY_FALLBACKS"),
            Field::with_factory("STORAGES", str_map(), || {
                let backend = |name: &str| {
                    Value::Table(BTreeMap::from([(
                        "BACKEND".to_string(),
                        Value::from(name),
                    )]))
                };
                Value::Table(BTreeMap::from([
                    (
                        "default".to_string(),
                        backend("django.core.files.storage.FileSystemStorage"),
                    ),
                    (
                        "staticfiles".to_string(),
                        backend("django.contrib.staticfiles.storage.StaticFilesStorage"),
                    ),
                ]))
            }),
            // Media and static files
            Field::with_default(
                "MEDIA_ROOT",
                Type::optional(str_or_path()),
                "",
            ),
            Field::with_default("MEDIA_URL", Type::optional(Type::Str), ""),
            nullable("STATIC_ROOT", str_or_path()),
            nullable("STATIC_URL", Type::Str),
            Field::with_factory(
                "STATICFILES_DIRS",
                Type::sequence_of(str_or_path()),
                empty_list,
            ),
            Field::with_factory("STATICFILES_FINDERS", any_sequence(), || {
                strings(STATICFILES_FINDERS)
            }),
            Field::with_factory("FILE_UPLOAD_HANDLERS", any_sequence(), || {
                strings(FILE_UPLOAD_HANDLERS)
            }),
            int("FILE_UPLOAD_MAX_MEMORY_SIZE", 2_621_440),
            int("DATA_UPLOAD_MAX_MEMORY_SIZE", 2_621_440),
            int("DATA_UPLOAD_MAX_NUMBER_FIELDS", 1000),
            int("DATA_UPLOAD_MAX_NUMBER_FILES", 100),
            nullable("FILE_UPLOAD_TEMP_DIR", str_or_path()),
            int("FILE_UPLOAD_PERMISSIONS", 0o644),
            nullable("FILE_UPLOAD_DIRECTORY_PERMISSIONS", Type::Int),
            Field::with_factory("FIXTURE_DIRS", Type::sequence_of(str_or_path()), empty_list),
            // Formatting
            nullable("FORMAT_MODULE_PATH", Type::Str),
            text("DATE_FORMAT", "N j, Y"),
            text("DATETIME_FORMAT", "N j, Y, P"),
            text("TIME_FORMAT", "P"),
            text("YEAR_MONTH_FORMAT", "F Y"),
            text("MONTH_DAY_FORMAT", "F j"),
            text("SHORT_DATE_FORMAT", "m/d/Y"),
            text("SHORT_DATETIME_FORMAT", "m/d/Y P"),
            int("FIRST_DAY_OF_WEEK", 0),
            text("DECIMAL_SEPARATOR", "."),
            flag("USE_THOUSAND_SEPARATOR", false),
            int("NUMBER_GROUPING", 0),
            text("THOUSAND_SEPARATOR", ","),
            text("DEFAULT_TABLESPACE", ""),
            text("DEFAULT_INDEX_TABLESPACE", ""),
            text("DEFAULT_AUTO_FIELD", "django.db.models.AutoField"),
            Field::with_factory("ABSOLUTE_URL_OVERRIDES", Type::Dict(None), empty_dict),
            // HTTP
            text("X_FRAME_OPTIONS", "DENY"),
            flag("USE_X_FORWARDED_HOST", false),
            flag("USE_X_FORWARDED_PORT", false),
            nullable("WSGI_APPLICATION", Type::Str),
            nullable("ASGI_APPLICATION", Type::Str),
            nullable("SECURE_PROXY_SSL_HEADER", any_tuple_or_list()),
            text(
                "DEFAULT_EXCEPTION_REPORTER",
                "django.views.debug.ExceptionReporter",
            ),
            text(
                "DEFAULT_EXCEPTION_REPORTER_FILTER",
                "django.views.debug.SafeExceptionReporterFilter",
            ),
            Field::with_factory("MIDDLEWARE", Type::sequence_of(Type::Str), empty_list),
            // Cache
            Field::with_factory(
                "CACHES",
                Type::dict_of(Type::Str, Type::Record(&CACHE)),
                || {
                    Value::Table(BTreeMap::from([(
                        "default".to_string(),
                        Value::Table(BTreeMap::from([(
                            "BACKEND".to_string(),
                            Value::from("django.core.cache.backends.locmem.LocMemCache"),
                        )])),
                    )]))
                },
            ),
            text("CACHE_MIDDLEWARE_KEY_PREFIX", ""),
            int("CACHE_MIDDLEWARE_SECONDS", 600),
            text("CACHE_MIDDLEWARE_ALIAS", "default"),
            // Sessions
            text("SESSION_CACHE_ALIAS", "default"),
            text("SESSION_COOKIE_NAME", "sessionid"),
            int("SESSION_COOKIE_AGE", 60 * 60 * 24 * 7 * 2),
            unknown("SESSION_COOKIE_DOMAIN"),
            flag("SESSION_COOKIE_SECURE", false),
            text("SESSION_COOKIE_PATH", "/"),
            flag("SESSION_COOKIE_HTTPONLY", true),
            text("SESSION_COOKIE_SAMESITE", "Lax"),
            flag("SESSION_SAVE_EVERY_REQUEST", false),
            flag("SESSION_EXPIRE_AT_BROWSER_CLOSE", false),
            text("SESSION_ENGINE", "django.contrib.sessions.backends.db"),
            nullable("SESSION_FILE_PATH", str_or_path()),
            text(
                "SESSION_SERIALIZER",
                "django.contrib.sessions.serializers.JSONSerializer",
            ),
            // Authentication
            text("AUTH_USER_MODEL", "auth.User"),
            Field::with_factory(
                "AUTHENTICATION_BACKENDS",
                Type::sequence_of(Type::Str),
                || strings(&["django.contrib.auth.backends.ModelBackend"]),
            ),
            text("LOGIN_URL", "/accounts/login/"),
            text("LOGIN_REDIRECT_URL", "/accounts/profile/"),
            nullable("LOGOUT_REDIRECT_URL", Type::Str),
            int("PASSWORD_RESET_TIMEOUT", 60 * 60 * 24 * 3),
            Field::with_factory("PASSWORD_HASHERS", any_sequence(), || {
                strings(PASSWORD_HASHERS)
            }),
            Field::with_factory(
                "AUTH_PASSWORD_VALIDATORS",
                Type::sequence_of(Type::Record(&AUTH_PASSWORD_VALIDATOR)),
                empty_list,
            ),
            text("SIGNING_BACKEND", "django.core.signing.TimestampSigner"),
            // CSRF
            text("CSRF_FAILURE_VIEW", "django.views.csrf.csrf_failure"),
            text("CSRF_COOKIE_NAME", "csrftoken"),
            int("CSRF_COOKIE_AGE", 60 * 60 * 24 * 7 * 52),
            nullable("CSRF_COOKIE_DOMAIN", Type::Str),
            text("CSRF_COOKIE_PATH", "/"),
            flag("CSRF_COOKIE_SECURE", false),
            flag("CSRF_COOKIE_HTTPONLY", false),
            text("CSRF_COOKIE_SAMESITE", "Lax"),
            text("CSRF_HEADER_NAME", "HTTP_X_CSRFTOKEN"),
            sequence("CSRF_TRUSTED_ORIGINS"),
            flag("CSRF_USE_SESSIONS", false),
            // Messages, logging, testing
            text(
                "MESSAGE_STORAGE",
                "django.contrib.messages.storage.fallback.FallbackStorage",
            ),
            text("LOGGING_CONFIG", "logging.config.dictConfig"),
            Field::with_factory("LOGGING", Type::Dict(None), empty_dict),
            text("TEST_RUNNER", "django.test.runner.DiscoverRunner"),
            sequence("TEST_NON_SERIALIZED_APPS"),
            Field::with_factory("MIGRATION_MODULES", Type::Dict(None), empty_dict),
            sequence("SILENCED_SYSTEM_CHECKS"),
            // Security middleware
            flag("SECURE_CONTENT_TYPE_NOSNIFF", true),
            text("SECURE_CROSS_ORIGIN_OPENER_POLICY", "same-origin"),
            flag("SECURE_HSTS_INCLUDE_SUBDOMAINS", false),
            flag("SECURE_HSTS_PRELOAD", false),
            int("SECURE_HSTS_SECONDS", 0),
            sequence("SECURE_REDIRECT_EXEMPT"),
            text("SECURE_REFERRER_POLICY", "same-origin"),
            nullable("SECURE_SSL_HOST", Type::Str),
            flag("SECURE_SSL_REDIRECT", false),
            // Tasks
            Field::with_factory(
                "TASKS",
                Type::dict_of(Type::Str, Type::Record(&TASK)),
                || {
                    Value::Table(BTreeMap::from([(
                        "default".to_string(),
                        Value::Table(BTreeMap::from([(
                            "BACKEND".to_string(),
                            Value::from("django.tasks.backends.immediate.ImmediateBackend"),
                        )])),
                    )]))
                },
            ),
        ],
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_key_is_only_required_setting() {
        let required: Vec<_> = SETTINGS
            .fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name)
            .collect();
        assert_eq!(required, vec!["SECRET_KEY"]);
    }

    #[test]
    fn test_field_names_are_unique() {
        for record in [&*SETTINGS, &*DATABASE, &*CACHE, &*TEMPLATE, &*TASK] {
            let mut names = record.field_names();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), record.fields.len(), "{}", record.name);
        }
    }

    #[test]
    fn test_nested_records_reachable_from_settings() {
        let databases = SETTINGS.field("DATABASES").map(|f| &f.ty);
        assert_eq!(
            databases,
            Some(&Type::dict_of(Type::Str, Type::Record(&DATABASE)))
        );
        let templates = SETTINGS.field("TEMPLATES").map(|f| &f.ty);
        assert_eq!(
            templates,
            Some(&Type::sequence_of(Type::Record(&TEMPLATE)))
        );
    }

    #[test]
    fn test_settings_defaults() {
        let defaults = SETTINGS.defaults();
        assert_eq!(defaults["DEBUG"], Value::Bool(false));
        assert_eq!(defaults["EMAIL_PORT"], Value::Integer(25));
        assert_eq!(defaults["SECRET_KEY"], Value::from(""));
        assert_eq!(
            defaults["CACHES"].get_path("default.BACKEND"),
            Some(&Value::from("django.core.cache.backends.locmem.LocMemCache"))
        );
        assert_eq!(
            defaults["LANGUAGES"].as_sequence().map(<[Value]>::len),
            Some(LANGUAGES.len())
        );
    }

    #[test]
    fn test_task_queues_default() {
        assert_eq!(
            TASK.defaults()["QUEUES"],
            Value::List(vec![Value::from("default")])
        );
    }
}
