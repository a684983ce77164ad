use crate::api::employee;
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        // /employees
        web::resource("/employees").route(web::get().to(employee::list_employees)),
    )
    .service(
        // /upload_csv
        web::resource("/upload_csv").route(web::post().to(employee::upload_csv)),
    );
}
