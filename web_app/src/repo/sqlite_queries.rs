pub const QUERY_GET_CONFIG_VALUE: &str = r#"
SELECT valor FROM configuracion WHERE clave=$1;
"#;

// LIKE would treat the underscore of the prefix as a wildcard
pub const QUERY_GET_CONFIG_VALUES_BY_PREFIX: &str = r#"
SELECT clave, valor
FROM configuracion
WHERE substr(clave, 1, length($1))=$1
ORDER BY clave;
"#;

pub const QUERY_ORDER_CODE_EXISTS: &str = r#"
SELECT EXISTS(SELECT 1 FROM codigos_plan WHERE codigo=$1);
"#;

pub const QUERY_INSERT_PENDING_ORDER: &str = r#"
INSERT INTO codigos_plan(
    codigo,plan_descripcion,monto,cliente_nombre,cliente_celular,cliente_email,
    num_personas,fecha_venta,fecha_visita,fecha_vencimiento,estado,
    metodo_pago,agente_nombre,detalle_json
) VALUES($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14);
"#;

pub const QUERY_DELETE_PENDING_ORDER: &str = r#"
DELETE FROM codigos_plan WHERE codigo=$1 AND estado=$2;
"#;

pub const QUERY_UPDATE_PENDING_ORDER_STATUS: &str = r#"
UPDATE codigos_plan
SET estado=$1, actualizado_en=$2
WHERE codigo=$3 AND estado=$4;
"#;

pub const QUERY_GET_ORDER_BY_CODE: &str = r#"
SELECT
    codigo,
    plan_descripcion,
    monto,
    cliente_nombre,
    cliente_celular,
    cliente_email,
    num_personas,
    fecha_venta,
    fecha_visita,
    fecha_vencimiento,
    estado,
    metodo_pago,
    agente_nombre,
    detalle_json
FROM codigos_plan
WHERE codigo=$1;
"#;
