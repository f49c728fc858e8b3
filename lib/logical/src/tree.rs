use crate::Operation;

impl Operation {
    /// Applies `f` to every direct child operation and rebuilds this node from the results.
    /// Operations nested in `EXISTS` expressions are not children.
    pub fn try_map_children<E>(
        self,
        mut f: impl FnMut(Operation) -> Result<Operation, E>,
    ) -> Result<Operation, E> {
        Ok(match self {
            Operation::Join { input } => {
                Operation::join(input.into_iter().map(&mut f).collect::<Result<_, _>>()?)
            }
            Operation::Union { input } => {
                Operation::union(input.into_iter().map(&mut f).collect::<Result<_, _>>()?)
            }
            Operation::CompositeUpdate { updates } => Operation::composite_update(
                updates.into_iter().map(&mut f).collect::<Result<_, _>>()?,
            ),
            Operation::LeftJoin {
                left,
                right,
                expression,
            } => Operation::left_join(f(*left)?, f(*right)?, expression),
            Operation::Minus { left, right } => Operation::minus(f(*left)?, f(*right)?),
            Operation::Filter { input, expression } => Operation::filter(f(*input)?, expression),
            Operation::Extend {
                input,
                variable,
                expression,
            } => Operation::extend(f(*input)?, variable, expression),
            Operation::Graph { input, name } => Operation::graph(f(*input)?, name),
            Operation::Service {
                input,
                name,
                silent,
            } => Operation::service(f(*input)?, name, silent),
            Operation::Group {
                input,
                variables,
                aggregates,
            } => Operation::group(f(*input)?, variables, aggregates),
            Operation::OrderBy { input, expressions } => {
                Operation::order_by(f(*input)?, expressions)
            }
            Operation::Project { input, variables } => Operation::project(f(*input)?, variables),
            Operation::Distinct { input } => Operation::distinct(f(*input)?),
            Operation::Reduced { input } => Operation::reduced(f(*input)?),
            Operation::Slice {
                input,
                start,
                length,
            } => Operation::slice(f(*input)?, start, length),
            Operation::From {
                input,
                default,
                named,
            } => Operation::from_dataset(f(*input)?, default, named),
            Operation::Construct { input, template } => {
                Operation::construct(f(*input)?, template)
            }
            Operation::Describe { input, terms } => Operation::describe(f(*input)?, terms),
            Operation::Ask { input } => Operation::ask(f(*input)?),
            Operation::DeleteInsert {
                delete,
                insert,
                where_clause,
            } => Operation::delete_insert(
                delete,
                insert,
                where_clause.map(|input| f(*input)).transpose()?,
            ),
            operation @ (Operation::Bgp { .. }
            | Operation::Pattern(_)
            | Operation::Path(_)
            | Operation::Values { .. }
            | Operation::Nop
            | Operation::Load { .. }
            | Operation::Clear { .. }
            | Operation::Create { .. }
            | Operation::Drop { .. }
            | Operation::Add { .. }
            | Operation::Move { .. }
            | Operation::Copy { .. }) => operation,
        })
    }
}
