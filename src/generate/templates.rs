//! File templates written by the driver generator.

pub(super) fn routes() -> String {
    "# frozen_string_literal: true\n\nRails.application.routes.draw do\nend\n".to_string()
}

pub(super) fn initializer(file_name: &str, module_name: &str) -> String {
    format!(
        "# frozen_string_literal: true\n\n\
         # Boot-time setup for the {file_name} driver.\n\
         {module_name}.configure if {module_name}.respond_to?(:configure)\n"
    )
}

pub(super) fn module(module_name: &str) -> String {
    format!(
        "# frozen_string_literal: true\n\n\
         module {module_name}\n\
         \x20 def self.table_name_prefix\n\
         \x20   '{}_'\n\
         \x20 end\n\
         end\n",
        heck::ToSnakeCase::to_snake_case(module_name)
    )
}

pub(super) fn readme(file_name: &str, module_name: &str) -> String {
    format!(
        "# {module_name}\n\n\
         The `{file_name}` driver.\n\n\
         - Models, controllers and views live under `app/`, namespaced by `{module_name}`.\n\
         - Migrations go in `db/migrate/`; routes in `config/routes.rb`.\n\
         - Extensions to host types go in `extensions/<type>_extension.rb` and define\n\
         \x20 `{module_name}::<Type>Extension`.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_template_defines_namespace() {
        let src = module("StoreFront");
        assert!(src.starts_with("# frozen_string_literal: true"));
        let body = "module StoreFront\n  def self.table_name_prefix\n    'store_front_'\n  end\nend\n";
        assert!(src.contains(body));
    }

    #[test]
    fn readme_mentions_extension_convention() {
        assert!(readme("store", "Store").contains("Store::<Type>Extension"));
    }
}
